#![forbid(unsafe_code)]

//! Change record bus: per-field streams and a flattened current-values view.
//!
//! # Design
//!
//! Each change-detection pass the host reports which bound inputs changed,
//! as a [`ChangeRecord`] mapping field names to previous/current value
//! pairs. [`ChangeHub`] multicasts whole records and derives two projected
//! views on demand: [`field`] narrows to the transitions of one named field
//! (records not mentioning the field are skipped), and [`current_values`]
//! flattens each record into a plain object of the fields' new values.
//!
//! Records keep their fields in a sorted map, so iteration order and the
//! flattened object are deterministic regardless of insertion order.
//!
//! [`field`]: ChangeHub::field
//! [`current_values`]: ChangeHub::current_values

use std::collections::BTreeMap;

use rxbind_core::{Stream, Subject};
use serde_json::{Map, Value};
use tracing::debug;

// ---------------------------------------------------------------------------
// ValueChange / ChangeRecord
// ---------------------------------------------------------------------------

/// One field's transition during a change-detection pass.
///
/// `previous` is [`Value::Null`] on the first pass that binds the field.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange {
    pub previous: Value,
    pub current: Value,
}

impl ValueChange {
    #[must_use]
    pub fn new(previous: Value, current: Value) -> Self {
        Self { previous, current }
    }
}

/// The fields that changed in one pass, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeRecord {
    changes: BTreeMap<String, ValueChange>,
}

impl ChangeRecord {
    /// An empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, previous: Value, current: Value) -> Self {
        self.insert(field, ValueChange::new(previous, current));
        self
    }

    /// Record a field transition, replacing any earlier entry for the field.
    pub fn insert(&mut self, field: impl Into<String>, change: ValueChange) {
        self.changes.insert(field.into(), change);
    }

    /// The transition for `field`, if it changed this pass.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&ValueChange> {
        self.changes.get(field)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.changes.contains_key(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Changed fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ValueChange)> {
        self.changes.iter()
    }

    /// Flatten to an object of `field: current` pairs, dropping previous
    /// values.
    #[must_use]
    pub fn current_values(&self) -> Value {
        let map: Map<String, Value> = self
            .changes
            .iter()
            .map(|(field, change)| (field.clone(), change.current.clone()))
            .collect();
        Value::Object(map)
    }
}

// ---------------------------------------------------------------------------
// ChangeHub — the bus
// ---------------------------------------------------------------------------

/// Multicasts change records and derives per-field and flattened views.
#[derive(Debug, Default)]
pub struct ChangeHub {
    records: Subject<ChangeRecord>,
}

impl ChangeHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish one change-detection pass. A no-op once the hub has ended.
    pub fn notify(&self, record: ChangeRecord) {
        if self.records.is_closed() {
            debug!(
                fields = record.len(),
                "change notification after teardown ignored"
            );
            return;
        }
        self.records.push(record);
    }

    /// Seal the hub. Every record stream and derived view completes.
    /// Idempotent.
    pub fn end(&self) {
        self.records.complete();
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.records.is_closed()
    }

    /// The stream of whole change records.
    #[must_use]
    pub fn records(&self) -> Stream<ChangeRecord> {
        self.records.stream()
    }

    /// The transitions of one named field, skipping records that do not
    /// mention it. Each call derives a fresh stream over the shared record
    /// stream.
    #[must_use]
    pub fn field(&self, name: impl Into<String>) -> Stream<ValueChange> {
        let name = name.into();
        self.records
            .stream()
            .filter_map(move |record| record.get(&name).cloned())
    }

    /// Each record flattened to an object of current values, in record
    /// order.
    #[must_use]
    pub fn current_values(&self) -> Stream<Value> {
        self.records.stream().map(ChangeRecord::current_values)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
