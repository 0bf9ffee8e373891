#![forbid(unsafe_code)]

//! Hot multicast push streams with completion and RAII subscriptions.
//!
//! # Design
//!
//! A [`Subject<T>`] is the write half of a stream: `push()` delivers a value
//! to every live subscriber, `complete()` seals the stream. A [`Stream<T>`]
//! is the read half: a cheaply cloneable handle onto the same shared state
//! offering `subscribe()` and the demultiplexing operators `filter`, `map`,
//! and `filter_map`. Both halves wrap one `Rc<RefCell<..>>` inner, so a
//! subject and every stream handle derived from it share subscribers and
//! ordering.
//!
//! Subscribers are stored as `Weak` function pointers and pruned lazily
//! during delivery; dropping a [`Subscription`] guard unsubscribes. Derived
//! streams hold their upstream subscription internally and capture their own
//! inner only weakly, so dropping the last handle to a derived stream
//! detaches it from its source.
//!
//! # Invariants
//!
//! 1. Values are delivered to subscribers in registration order.
//! 2. A stream delivers values in exact `push()` order, and a derived stream
//!    preserves the relative order of its source.
//! 3. After `complete()`, no subscriber is ever invoked again; `push()` is a
//!    no-op; subscribers added later receive nothing.
//! 4. Completion propagates: when a source completes, every stream derived
//!    from it completes.
//! 5. Dropping a [`Subscription`] removes the callback before the next
//!    delivery cycle.
//!
//! # Failure Modes
//!
//! - **Re-entrant push**: a subscriber may call `push()` on the same subject;
//!   the nested value is delivered depth-first before the outer call
//!   returns. Dispatch is synchronous and single-threaded throughout.
//! - **Subscriber mutation during delivery**: subscribing or unsubscribing
//!   from inside a callback affects the next delivery, not the one in
//!   flight (the callback list is snapshotted per push).

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// A subscriber callback stored as a strong `Rc` in the guard, handed to the
/// stream as `Weak`.
type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

/// A completion hook, stored the same way as a value subscriber.
type CloseRc = Rc<dyn Fn()>;
type CloseWeak = Weak<dyn Fn()>;

/// Shared interior for [`Subject<T>`] and [`Stream<T>`].
struct Inner<T> {
    subscribers: Vec<CallbackWeak<T>>,
    closers: Vec<CloseWeak>,
    closed: bool,
    /// Guards keeping a derived stream attached to its source. Empty for a
    /// root subject; taken and dropped on completion.
    upstream: Vec<Subscription>,
}

impl<T> Inner<T> {
    fn new(closed: bool) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            subscribers: Vec::new(),
            closers: Vec::new(),
            closed,
            upstream: Vec::new(),
        }))
    }
}

/// Deliver `value` to every live subscriber of `inner`, pruning dead ones.
///
/// The callback list is snapshotted under the borrow and invoked after it is
/// released, so callbacks may freely subscribe, unsubscribe, or push.
fn deliver<T>(inner: &Rc<RefCell<Inner<T>>>, value: T) {
    let callbacks: Vec<CallbackRc<T>> = {
        let mut inner = inner.borrow_mut();
        if inner.closed {
            return;
        }
        inner.subscribers.retain(|w| w.strong_count() > 0);
        inner.subscribers.iter().filter_map(Weak::upgrade).collect()
    };
    for cb in &callbacks {
        cb(&value);
    }
}

/// Seal `inner`: mark closed, run completion hooks, release all subscribers
/// and upstream guards. Idempotent.
fn seal<T>(inner: &Rc<RefCell<Inner<T>>>) {
    let (closers, upstream) = {
        let mut inner = inner.borrow_mut();
        if inner.closed {
            return;
        }
        inner.closed = true;
        let closers: Vec<CloseRc> = inner.closers.iter().filter_map(Weak::upgrade).collect();
        inner.closers.clear();
        inner.subscribers.clear();
        (closers, std::mem::take(&mut inner.upstream))
    };
    for hook in &closers {
        hook();
    }
    drop(upstream);
}

// ---------------------------------------------------------------------------
// Subject<T> — write half
// ---------------------------------------------------------------------------

/// The write half of a hot multicast stream.
///
/// Cloning a `Subject` creates a new handle to the **same** stream — both
/// handles push to the same subscribers. Obtain the read half with
/// [`Subject::stream`].
pub struct Subject<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

// Manual Clone: shares the same Rc.
impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Subject")
            .field("closed", &inner.closed)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Subject<T> {
    /// Create a new, open subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Inner::new(false),
        }
    }

    /// Push a value to all current subscribers, in registration order.
    ///
    /// A no-op after [`complete`](Self::complete).
    pub fn push(&self, value: T) {
        deliver(&self.inner, value);
    }

    /// Seal the stream. Subscribers are released, derived streams complete,
    /// and later `push` calls deliver nothing. Idempotent.
    pub fn complete(&self) {
        seal(&self.inner);
    }

    /// Whether the stream has completed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.borrow().closed
    }

    /// The read half of this stream.
    #[must_use]
    pub fn stream(&self) -> Stream<T> {
        Stream {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Number of registered subscribers, counting dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

// ---------------------------------------------------------------------------
// Stream<T> — read half
// ---------------------------------------------------------------------------

/// The read half of a hot multicast stream.
///
/// Cloning a `Stream` creates another handle onto the **same** stream; all
/// handles share subscribers, so every subscriber of a given stream observes
/// the same delivery order. Streams are `Rc`-based and deliberately
/// single-threaded.
pub struct Stream<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

// Manual Clone: shares the same Rc.
impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Stream")
            .field("closed", &inner.closed)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: 'static> Stream<T> {
    /// A fresh stream that is already completed and will never emit.
    #[must_use]
    fn completed() -> Self {
        Self {
            inner: Inner::new(true),
        }
    }

    /// Subscribe to values. The callback runs synchronously for each value
    /// pushed after this call, until the returned guard is dropped or the
    /// stream completes. Subscribing to a completed stream yields nothing.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        {
            let mut inner = self.inner.borrow_mut();
            if !inner.closed {
                inner.subscribers.push(Rc::downgrade(&strong));
            }
        }
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Whether the stream has completed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.borrow().closed
    }

    /// Register a completion hook. Runs immediately if already completed.
    fn on_close(&self, hook: impl Fn() + 'static) -> Subscription {
        let strong: CloseRc = Rc::new(hook);
        let already_closed = {
            let mut inner = self.inner.borrow_mut();
            if inner.closed {
                true
            } else {
                inner.closers.push(Rc::downgrade(&strong));
                false
            }
        };
        if already_closed {
            strong();
        }
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Attach a derived stream to this source: feed it values through
    /// `feed`, and complete it when this stream completes.
    fn derive<U: 'static>(&self, feed: impl Fn(&T, &Rc<RefCell<Inner<U>>>) + 'static) -> Stream<U> {
        if self.is_closed() {
            return Stream::completed();
        }
        let derived: Stream<U> = Stream {
            inner: Inner::new(false),
        };

        let target = Rc::downgrade(&derived.inner);
        let feed_guard = self.subscribe(move |value| {
            if let Some(inner) = target.upgrade() {
                feed(value, &inner);
            }
        });
        derived.inner.borrow_mut().upstream.push(feed_guard);

        let target = Rc::downgrade(&derived.inner);
        let close_guard = self.on_close(move || {
            if let Some(inner) = target.upgrade() {
                seal(&inner);
            }
        });
        derived.inner.borrow_mut().upstream.push(close_guard);

        derived
    }

    /// A stream of the values matching `predicate`, in source order.
    ///
    /// The derived stream is constructed once; all its subscribers share it.
    /// It completes when this stream completes.
    #[must_use]
    pub fn filter(&self, predicate: impl Fn(&T) -> bool + 'static) -> Stream<T>
    where
        T: Clone,
    {
        self.derive(move |value, inner| {
            if predicate(value) {
                deliver(inner, value.clone());
            }
        })
    }

    /// A stream of `f` applied to each value, in source order. Completes
    /// when this stream completes.
    #[must_use]
    pub fn map<U: 'static>(&self, f: impl Fn(&T) -> U + 'static) -> Stream<U> {
        self.derive(move |value, inner| {
            deliver(inner, f(value));
        })
    }

    /// Filter and map in one step: emits `f(value)` only where it returns
    /// `Some`. Completes when this stream completes.
    #[must_use]
    pub fn filter_map<U: 'static>(&self, f: impl Fn(&T) -> Option<U> + 'static) -> Stream<U> {
        self.derive(move |value, inner| {
            if let Some(mapped) = f(value) {
                deliver(inner, mapped);
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Subscription — RAII guard
// ---------------------------------------------------------------------------

/// RAII guard for a subscriber callback.
///
/// Dropping the guard makes the callback unreachable: the strong `Rc` it
/// holds is released, so the `Weak` in the stream's subscriber list fails to
/// upgrade on the next delivery and is pruned.
#[must_use = "dropping a Subscription unsubscribes its callback"]
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Equality gate
// ---------------------------------------------------------------------------

/// Predicate factory: `eq(left)` returns `|right| left == *right`.
///
/// The point-free building block for demultiplexing a tagged stream with
/// [`Stream::filter`]:
///
/// ```
/// use rxbind_core::{Subject, eq};
///
/// let subject = Subject::new();
/// let zeros = subject.stream().filter(eq(0)).map(|_| "zero");
/// # drop(zeros);
/// # subject.push(1);
/// ```
///
/// Comparison is `PartialEq` value equality.
pub fn eq<T: PartialEq>(left: T) -> impl Fn(&T) -> bool {
    move |right| left == *right
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
