#![forbid(unsafe_code)]

//! Property sources: imperative writes exposed as a hot stream.
//!
//! A [`PropertySource`] pairs a sink ([`send`]) with a stream
//! ([`stream`]): every value written to the sink appears on the stream,
//! synchronously, for whoever is subscribed at that moment. There is no
//! replay. Cloning shares the underlying stream, so one handle can live
//! with the writer and another with the readers.
//!
//! [`send`]: PropertySource::send
//! [`stream`]: PropertySource::stream

use rxbind_core::{Stream, Subject};
use tracing::debug;

/// A hot stream/sink pair for one property.
#[derive(Debug)]
pub struct PropertySource<T> {
    subject: Subject<T>,
    name: Option<String>,
}

// Manual Clone: handles share the same stream.
impl<T> Clone for PropertySource<T> {
    fn clone(&self) -> Self {
        Self {
            subject: self.subject.clone(),
            name: self.name.clone(),
        }
    }
}

impl<T> Default for PropertySource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PropertySource<T> {
    /// An anonymous source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subject: Subject::new(),
            name: None,
        }
    }

    /// A source carrying a diagnostic name, surfaced in logs.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            subject: Subject::new(),
            name: Some(name.into()),
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Write a value; it is delivered to current subscribers immediately.
    /// A no-op once the source is closed.
    pub fn send(&self, value: T) {
        if self.subject.is_closed() {
            debug!(
                source = self.name.as_deref().unwrap_or("<anonymous>"),
                "send on closed property source ignored"
            );
            return;
        }
        self.subject.push(value);
    }

    /// The read half. Subscribers see values sent after they subscribe.
    #[must_use]
    pub fn stream(&self) -> Stream<T> {
        self.subject.stream()
    }

    /// Seal the source; the stream completes. Idempotent.
    pub fn close(&self) {
        self.subject.complete();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.subject.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn sent_values_appear_on_stream() {
        let source = PropertySource::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        let _sub = source.stream().subscribe(move |v| l.borrow_mut().push(*v));

        source.send(1);
        source.send(2);
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn no_replay_for_late_subscribers() {
        let source = PropertySource::new();
        source.send("missed");

        let count = Rc::new(Cell::new(0u32));
        let c = Rc::clone(&count);
        let _sub = source.stream().subscribe(move |_| c.set(c.get() + 1));

        assert_eq!(count.get(), 0);
        source.send("seen");
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn clone_shares_the_stream() {
        let writer = PropertySource::new();
        let reader = writer.clone();

        let last = Rc::new(Cell::new(0));
        let seen = Rc::clone(&last);
        let _sub = reader.stream().subscribe(move |v| seen.set(*v));

        writer.send(7);
        assert_eq!(last.get(), 7);
    }

    #[test]
    fn named_source_reports_its_name() {
        let source: PropertySource<u8> = PropertySource::named("selected_id");
        assert_eq!(source.name(), Some("selected_id"));
        assert_eq!(PropertySource::<u8>::new().name(), None);
    }

    #[test]
    fn send_after_close_is_noop() {
        let source = PropertySource::named("count");
        let count = Rc::new(Cell::new(0u32));
        let c = Rc::clone(&count);
        let _sub = source.stream().subscribe(move |_| c.set(c.get() + 1));

        source.send(1);
        source.close();
        source.send(2);

        assert_eq!(count.get(), 1);
        assert!(source.is_closed());
        assert!(source.stream().is_closed());
    }
}
