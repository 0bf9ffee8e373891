#![forbid(unsafe_code)]

//! Easy-mode adapter for lifecycle-driven components.
//!
//! [`Reactive`] wraps a [`Component`] and fans every host notification out
//! twice: first to the component's own hook method, then onto the matching
//! bus ([`LifecycleHooks`] for lifecycle moments, [`ChangeHub`] for change
//! records). Code that prefers streams subscribes to the buses; code that
//! prefers overriding methods implements the trait; both observe the same
//! notifications in the same order.
//!
//! The adapter also retains subscriptions on the component's behalf: guards
//! passed to [`retain`](Reactive::retain) live until the destroy
//! notification, which completes both buses and severs every retained
//! binding in one step.
//!
//! # Example
//!
//! ```
//! use rxbind::component::{Component, Reactive};
//! use rxbind::lifecycle::LifecycleEvent;
//!
//! #[derive(Default)]
//! struct Profile {
//!     ready: bool,
//! }
//!
//! impl Component for Profile {
//!     fn on_init(&mut self) {
//!         self.ready = true;
//!     }
//! }
//!
//! let mut profile = Reactive::new(Profile::default());
//! let seen = std::rc::Rc::new(std::cell::Cell::new(false));
//! let flag = std::rc::Rc::clone(&seen);
//! let sub = profile.lifecycle().on_init().subscribe(move |_| flag.set(true));
//!
//! profile.notify(LifecycleEvent::Init);
//! assert!(profile.inner().ready);
//! assert!(seen.get());
//! # drop(sub);
//! ```

use rxbind_core::{Subscription, SubscriptionSet};

use crate::changes::{ChangeHub, ChangeRecord};
use crate::lifecycle::{LifecycleEvent, LifecycleHooks};

/// A component driven by host lifecycle notifications.
///
/// Every hook defaults to an empty body, so implementations override only
/// the moments they care about.
pub trait Component {
    /// Bound inputs changed. Runs before [`on_init`](Self::on_init) on the
    /// first pass and before every [`on_check_cycle`](Self::on_check_cycle)
    /// thereafter, matching the host's invocation order.
    fn on_changes(&mut self, _record: &ChangeRecord) {}

    /// Inputs are bound; the component is live.
    fn on_init(&mut self) {}

    /// One change-detection pass ran.
    fn on_check_cycle(&mut self) {}

    /// Projected content finished initializing.
    fn on_content_init(&mut self) {}

    /// Projected content was checked this cycle.
    fn on_content_checked(&mut self) {}

    /// The component's own view finished initializing.
    fn on_view_init(&mut self) {}

    /// The component's own view was checked this cycle.
    fn on_view_checked(&mut self) {}

    /// The component is being torn down.
    fn on_destroy(&mut self) {}
}

/// Adapter pairing a [`Component`] with lifecycle and change buses.
#[derive(Debug)]
pub struct Reactive<C: Component> {
    inner: C,
    lifecycle: LifecycleHooks,
    changes: ChangeHub,
    retained: SubscriptionSet,
}

impl<C: Component> Reactive<C> {
    /// Wrap a component with fresh, open buses.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            lifecycle: LifecycleHooks::new(),
            changes: ChangeHub::new(),
            retained: SubscriptionSet::new(),
        }
    }

    /// The wrapped component.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Mutable access to the wrapped component.
    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    /// Consume the adapter and return the component. The buses are dropped
    /// without a destroy notification.
    pub fn into_inner(self) -> C {
        self.inner
    }

    /// The lifecycle bus.
    pub fn lifecycle(&self) -> &LifecycleHooks {
        &self.lifecycle
    }

    /// The change record bus.
    pub fn changes(&self) -> &ChangeHub {
        &self.changes
    }

    /// Whether the destroy notification has been processed.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.lifecycle.is_destroyed()
    }

    /// Keep a subscription alive until the destroy notification.
    pub fn retain(&mut self, subscription: Subscription) {
        self.retained.hold(subscription);
    }

    /// Process a host lifecycle notification: the component's hook method
    /// runs first, then the event goes out on the lifecycle bus.
    ///
    /// [`LifecycleEvent::Destroy`] additionally completes the change bus and
    /// drops every retained subscription, after the destroy event has been
    /// delivered. Notifications after destroy do nothing.
    pub fn notify(&mut self, event: LifecycleEvent) {
        if self.lifecycle.is_destroyed() {
            self.lifecycle.notify(event);
            return;
        }
        match event {
            LifecycleEvent::Init => self.inner.on_init(),
            LifecycleEvent::CheckCycle => self.inner.on_check_cycle(),
            LifecycleEvent::ContentInit => self.inner.on_content_init(),
            LifecycleEvent::ContentChecked => self.inner.on_content_checked(),
            LifecycleEvent::ViewInit => self.inner.on_view_init(),
            LifecycleEvent::ViewChecked => self.inner.on_view_checked(),
            LifecycleEvent::Destroy => self.inner.on_destroy(),
        }
        self.lifecycle.notify(event);
        if event == LifecycleEvent::Destroy {
            self.changes.end();
            self.retained.clear();
        }
    }

    /// Process a change-detection pass: the component's
    /// [`on_changes`](Component::on_changes) runs first, then the record
    /// goes out on the change bus. A no-op after destroy.
    pub fn notify_changes(&mut self, record: ChangeRecord) {
        if self.changes.is_ended() {
            self.changes.notify(record);
            return;
        }
        self.inner.on_changes(&record);
        self.changes.notify(record);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
