#![forbid(unsafe_code)]

//! Lifecycle event bus: seven kind-filtered streams over one shared subject.
//!
//! # Design
//!
//! A host environment drives a component through seven named lifecycle
//! moments. [`LifecycleHooks`] turns those imperative invocations into
//! streams: [`notify`] pushes a [`LifecycleEvent`] onto one internal subject,
//! and seven derived streams (one per kind, built once at construction with
//! `filter(eq(kind))`) fan the events out. Every caller of an accessor gets
//! a handle onto the same shared derived stream, so subscribers of one kind
//! always agree on ordering.
//!
//! # Invariants
//!
//! 1. Each per-kind stream emits exactly the events of its kind, in
//!    notification order.
//! 2. `notify(Destroy)` emits the destroy event first, then completes the
//!    bus; after that every stream (per-kind and raw) is closed.
//! 3. Notifying a destroyed bus delivers nothing. It is logged at debug
//!    level and is otherwise a no-op.
//!
//! [`notify`]: LifecycleHooks::notify

use std::fmt;

use rxbind_core::{Stream, Subject, eq};
use tracing::debug;

/// The seven host-invoked lifecycle moments, in host invocation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// Inputs are bound; the component is live.
    Init,
    /// One change-detection pass ran.
    CheckCycle,
    /// Projected content finished initializing.
    ContentInit,
    /// Projected content was checked this cycle.
    ContentChecked,
    /// The component's own view finished initializing.
    ViewInit,
    /// The component's own view was checked this cycle.
    ViewChecked,
    /// The component is being torn down. Terminal.
    Destroy,
}

impl LifecycleEvent {
    /// All events in host invocation order.
    pub const ALL: [LifecycleEvent; 7] = [
        LifecycleEvent::Init,
        LifecycleEvent::CheckCycle,
        LifecycleEvent::ContentInit,
        LifecycleEvent::ContentChecked,
        LifecycleEvent::ViewInit,
        LifecycleEvent::ViewChecked,
        LifecycleEvent::Destroy,
    ];

    /// Stable lowercase name, used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            LifecycleEvent::Init => "init",
            LifecycleEvent::CheckCycle => "check_cycle",
            LifecycleEvent::ContentInit => "content_init",
            LifecycleEvent::ContentChecked => "content_checked",
            LifecycleEvent::ViewInit => "view_init",
            LifecycleEvent::ViewChecked => "view_checked",
            LifecycleEvent::Destroy => "destroy",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// LifecycleHooks — the bus
// ---------------------------------------------------------------------------

/// Event bus translating imperative lifecycle invocations into streams.
///
/// One subject carries every event; seven filtered streams, built once here,
/// carry the per-kind views. The bus completes itself when it sees
/// [`LifecycleEvent::Destroy`].
#[derive(Debug)]
pub struct LifecycleHooks {
    events: Subject<LifecycleEvent>,
    init: Stream<LifecycleEvent>,
    check_cycle: Stream<LifecycleEvent>,
    content_init: Stream<LifecycleEvent>,
    content_checked: Stream<LifecycleEvent>,
    view_init: Stream<LifecycleEvent>,
    view_checked: Stream<LifecycleEvent>,
    destroy: Stream<LifecycleEvent>,
}

impl Default for LifecycleHooks {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleHooks {
    /// A fresh bus with all seven per-kind streams wired.
    #[must_use]
    pub fn new() -> Self {
        let events = Subject::new();
        let all = events.stream();
        Self {
            init: all.filter(eq(LifecycleEvent::Init)),
            check_cycle: all.filter(eq(LifecycleEvent::CheckCycle)),
            content_init: all.filter(eq(LifecycleEvent::ContentInit)),
            content_checked: all.filter(eq(LifecycleEvent::ContentChecked)),
            view_init: all.filter(eq(LifecycleEvent::ViewInit)),
            view_checked: all.filter(eq(LifecycleEvent::ViewChecked)),
            destroy: all.filter(eq(LifecycleEvent::Destroy)),
            events,
        }
    }

    /// Record that the host invoked a lifecycle hook.
    ///
    /// [`LifecycleEvent::Destroy`] is delivered to subscribers and then
    /// completes the bus. Notifying after destruction delivers nothing.
    pub fn notify(&self, event: LifecycleEvent) {
        if self.events.is_closed() {
            debug!(event = %event, "lifecycle notification after destroy ignored");
            return;
        }
        self.events.push(event);
        if event == LifecycleEvent::Destroy {
            self.events.complete();
        }
    }

    /// Whether the bus has seen [`LifecycleEvent::Destroy`].
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.events.is_closed()
    }

    /// The raw stream of every lifecycle event, unfiltered.
    #[must_use]
    pub fn events(&self) -> Stream<LifecycleEvent> {
        self.events.stream()
    }

    /// Stream of [`LifecycleEvent::Init`] events.
    #[must_use]
    pub fn on_init(&self) -> Stream<LifecycleEvent> {
        self.init.clone()
    }

    /// Stream of [`LifecycleEvent::CheckCycle`] events.
    #[must_use]
    pub fn on_check_cycle(&self) -> Stream<LifecycleEvent> {
        self.check_cycle.clone()
    }

    /// Stream of [`LifecycleEvent::ContentInit`] events.
    #[must_use]
    pub fn on_content_init(&self) -> Stream<LifecycleEvent> {
        self.content_init.clone()
    }

    /// Stream of [`LifecycleEvent::ContentChecked`] events.
    #[must_use]
    pub fn on_content_checked(&self) -> Stream<LifecycleEvent> {
        self.content_checked.clone()
    }

    /// Stream of [`LifecycleEvent::ViewInit`] events.
    #[must_use]
    pub fn on_view_init(&self) -> Stream<LifecycleEvent> {
        self.view_init.clone()
    }

    /// Stream of [`LifecycleEvent::ViewChecked`] events.
    #[must_use]
    pub fn on_view_checked(&self) -> Stream<LifecycleEvent> {
        self.view_checked.clone()
    }

    /// Stream of the single [`LifecycleEvent::Destroy`] event. Fires once,
    /// immediately before every bus stream completes.
    #[must_use]
    pub fn on_destroy(&self) -> Stream<LifecycleEvent> {
        self.destroy.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn per_kind_stream_sees_only_its_kind() {
        let hooks = LifecycleHooks::new();
        let inits = Rc::new(Cell::new(0u32));
        let checks = Rc::new(Cell::new(0u32));

        let i = Rc::clone(&inits);
        let _si = hooks.on_init().subscribe(move |_| i.set(i.get() + 1));
        let c = Rc::clone(&checks);
        let _sc = hooks.on_check_cycle().subscribe(move |_| c.set(c.get() + 1));

        hooks.notify(LifecycleEvent::Init);
        hooks.notify(LifecycleEvent::CheckCycle);
        hooks.notify(LifecycleEvent::CheckCycle);
        hooks.notify(LifecycleEvent::ViewChecked);

        assert_eq!(inits.get(), 1);
        assert_eq!(checks.get(), 2);
    }

    #[test]
    fn raw_stream_sees_everything_in_order() {
        let hooks = LifecycleHooks::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        let _sub = hooks.events().subscribe(move |e| l.borrow_mut().push(*e));

        for event in LifecycleEvent::ALL {
            hooks.notify(event);
        }
        assert_eq!(*log.borrow(), LifecycleEvent::ALL.to_vec());
    }

    #[test]
    fn every_kind_reaches_its_own_stream() {
        let hooks = LifecycleHooks::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let streams = [
            hooks.on_init(),
            hooks.on_check_cycle(),
            hooks.on_content_init(),
            hooks.on_content_checked(),
            hooks.on_view_init(),
            hooks.on_view_checked(),
            hooks.on_destroy(),
        ];
        let _subs: Vec<_> = streams
            .iter()
            .map(|s| {
                let l = Rc::clone(&log);
                s.subscribe(move |e| l.borrow_mut().push(*e))
            })
            .collect();

        for event in LifecycleEvent::ALL {
            hooks.notify(event);
        }
        assert_eq!(*log.borrow(), LifecycleEvent::ALL.to_vec());
    }

    #[test]
    fn destroy_emits_then_completes_all_streams() {
        let hooks = LifecycleHooks::new();
        let destroyed = Rc::new(Cell::new(false));
        let d = Rc::clone(&destroyed);
        let _sub = hooks.on_destroy().subscribe(move |_| d.set(true));

        assert!(!hooks.is_destroyed());
        hooks.notify(LifecycleEvent::Destroy);

        assert!(destroyed.get(), "destroy event delivered before completion");
        assert!(hooks.is_destroyed());
        assert!(hooks.events().is_closed());
        assert!(hooks.on_init().is_closed());
        assert!(hooks.on_view_checked().is_closed());
        assert!(hooks.on_destroy().is_closed());
    }

    #[test]
    fn notify_after_destroy_is_noop() {
        let hooks = LifecycleHooks::new();
        let count = Rc::new(Cell::new(0u32));
        let c = Rc::clone(&count);
        let _sub = hooks.events().subscribe(move |_| c.set(c.get() + 1));

        hooks.notify(LifecycleEvent::Destroy);
        hooks.notify(LifecycleEvent::Init);
        hooks.notify(LifecycleEvent::CheckCycle);

        assert_eq!(count.get(), 1, "only the destroy event was delivered");
    }

    #[test]
    fn accessors_share_one_derived_stream() {
        let hooks = LifecycleHooks::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = Rc::clone(&log);
        let _a = hooks.on_init().subscribe(move |_| l1.borrow_mut().push("a"));
        let l2 = Rc::clone(&log);
        let _b = hooks.on_init().subscribe(move |_| l2.borrow_mut().push("b"));

        hooks.notify(LifecycleEvent::Init);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn display_names_are_stable() {
        assert_eq!(LifecycleEvent::Init.to_string(), "init");
        assert_eq!(LifecycleEvent::CheckCycle.to_string(), "check_cycle");
        assert_eq!(LifecycleEvent::Destroy.to_string(), "destroy");
    }
}
