#![forbid(unsafe_code)]

//! Core: hot streams, subscriptions, and equality gates.
//!
//! # Role in RxBind
//! `rxbind-core` is the stream layer. It owns the multicast push primitive
//! ([`Subject`]/[`Stream`]), the RAII [`Subscription`] guard, and the
//! [`SubscriptionSet`] used to tear down a component's bindings in one move.
//!
//! # Primary responsibilities
//! - **Subject / Stream**: write and read halves of a hot, synchronous,
//!   single-threaded multicast stream with completion.
//! - **Operators**: `filter`, `map`, and `filter_map` derive shared streams
//!   that complete with their source.
//! - **eq**: the predicate factory used to demultiplex tagged streams.
//!
//! # How it fits in the system
//! The adapter layer (`rxbind`) builds its lifecycle and change buses on
//! these primitives. Nothing here knows about components, fields, or value
//! trees; this crate is deliberately dependency-free.

pub mod scope;
pub mod subject;

pub use scope::SubscriptionSet;
pub use subject::{Stream, Subject, Subscription, eq};
