#![forbid(unsafe_code)]

//! Adapter layer between imperative component lifecycles and streams.
//!
//! # Role in RxBind
//! `rxbind` sits between a host environment that drives components through
//! named lifecycle hooks and application code that wants to consume those
//! moments as streams. It also carries the value-binding side: reconciling
//! plain objects onto field trees and copying projected subsets between
//! objects.
//!
//! # Primary responsibilities
//! - **LifecycleHooks**: one bus, seven kind-filtered lifecycle streams,
//!   completing at destroy.
//! - **ChangeHub**: change-detection passes as records, per-field streams,
//!   and a flattened current-values view.
//! - **PropertySource**: imperative property writes exposed as a hot stream.
//! - **reconcile / projection**: conditional tree reconciliation with
//!   diagnostics, and the unconditional projected copier.
//! - **Reactive**: wraps a [`Component`] so hook methods and bus streams
//!   observe the same notifications in the same order.
//!
//! # How it fits in the system
//! The stream primitives live in `rxbind-core`; this crate owns everything
//! that knows about components, fields, and values. Dispatch is synchronous
//! and single-threaded throughout: a notification returns only after every
//! subscriber has run.

pub mod changes;
pub mod component;
pub mod form;
pub mod lifecycle;
pub mod projection;
pub mod reconcile;
pub mod source;

pub use changes::{ChangeHub, ChangeRecord, ValueChange};
pub use component::{Component, Reactive};
pub use form::{FieldGroup, FieldLeaf, FieldNode};
pub use lifecycle::{LifecycleEvent, LifecycleHooks};
pub use projection::{Projection, copy_projection, dispatch_projection, project};
pub use reconcile::{Diagnostic, ReconcileReport, reconcile, reconcile_projected};
pub use source::PropertySource;

// Stream primitives re-exported so downstream code needs one dependency.
pub use rxbind_core::{Stream, Subject, Subscription, SubscriptionSet, eq};
