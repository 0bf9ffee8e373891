#![forbid(unsafe_code)]

//! Bulk ownership of subscriptions with a single release point.
//!
//! A [`SubscriptionSet`] keeps any number of [`Subscription`] guards alive
//! and drops them all at once, either explicitly via [`clear`] or when the
//! set itself is dropped. Adapters hold one set per component so that every
//! binding wired during the component's life is severed at teardown.
//!
//! [`clear`]: SubscriptionSet::clear

use crate::subject::Subscription;

/// Owns a group of subscriptions and releases them together.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a subscription, keeping its callback alive until
    /// the set is cleared or dropped.
    pub fn hold(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Drop every held subscription, unsubscribing all of them.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }

    /// Number of held subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl Extend<Subscription> for SubscriptionSet {
    fn extend<I: IntoIterator<Item = Subscription>>(&mut self, iter: I) {
        self.subscriptions.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::Subject;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn held_subscription_stays_live() {
        let subject = Subject::new();
        let count = Rc::new(Cell::new(0u32));
        let c = Rc::clone(&count);

        let mut set = SubscriptionSet::new();
        set.hold(subject.stream().subscribe(move |_| c.set(c.get() + 1)));
        assert_eq!(set.len(), 1);

        subject.push(());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn clear_unsubscribes_everything() {
        let subject = Subject::new();
        let count = Rc::new(Cell::new(0u32));

        let mut set = SubscriptionSet::new();
        for _ in 0..3 {
            let c = Rc::clone(&count);
            set.hold(subject.stream().subscribe(move |_| c.set(c.get() + 1)));
        }

        subject.push(());
        assert_eq!(count.get(), 3);

        set.clear();
        assert!(set.is_empty());

        subject.push(());
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn dropping_the_set_unsubscribes() {
        let subject = Subject::new();
        let count = Rc::new(Cell::new(0u32));
        let c = Rc::clone(&count);

        {
            let mut set = SubscriptionSet::new();
            set.hold(subject.stream().subscribe(move |_| c.set(c.get() + 1)));
            subject.push(());
        }

        subject.push(());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn extend_collects_guards() {
        let subject: Subject<u8> = Subject::new();
        let mut set = SubscriptionSet::new();
        set.extend([
            subject.stream().subscribe(|_| {}),
            subject.stream().subscribe(|_| {}),
        ]);
        assert_eq!(set.len(), 2);
    }
}
