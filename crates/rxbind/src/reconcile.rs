#![forbid(unsafe_code)]

//! Tree reconciliation: project a plain object onto a field tree.
//!
//! # Design
//!
//! [`reconcile`] walks the target [`FieldGroup`] field by field and pulls
//! each field's new value out of a source object. A leaf is written only
//! when the incoming value differs from what it already holds (deep value
//! equality), which keeps write-triggered change notifications from
//! re-entering the reconciler. A nested group recurses with the matching
//! source subtree. The walk never fails: shape mismatches are recorded as
//! [`Diagnostic`]s in the returned [`ReconcileReport`] and logged as
//! warnings, and the remaining fields still reconcile.
//!
//! # Edge cases
//!
//! - A source key missing for a leaf reads as [`Value::Null`]; the leaf is
//!   written to null if it held anything else.
//! - A source that is not an object (for the whole call, or for a nested
//!   group) yields one [`Diagnostic::NullSource`] for that subtree, which
//!   is skipped; siblings proceed.
//! - A projected name with no target field yields
//!   [`Diagnostic::MissingTarget`]; nothing is written for it.

use std::fmt;

use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::form::{FieldGroup, FieldNode};
use crate::projection::Projection;

// ---------------------------------------------------------------------------
// Diagnostics and report
// ---------------------------------------------------------------------------

/// A non-fatal shape mismatch found during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The projection named a field the target tree does not have.
    MissingTarget { path: String },
    /// The source had no object where the target has a group (or, with an
    /// empty path, the whole source was not an object).
    NullSource { path: String },
}

impl Diagnostic {
    /// Dotted path from the tree root; empty for the root itself.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Diagnostic::MissingTarget { path } | Diagnostic::NullSource { path } => path,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingTarget { path } => {
                write!(f, "no target field at '{path}'")
            }
            Diagnostic::NullSource { path } if path.is_empty() => {
                f.write_str("source is null at root")
            }
            Diagnostic::NullSource { path } => {
                write!(f, "source is null at '{path}'")
            }
        }
    }
}

/// What one reconciliation pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    writes: Vec<String>,
    unchanged: usize,
    diagnostics: Vec<Diagnostic>,
}

impl ReconcileReport {
    /// Paths of leaves written, in traversal order.
    #[must_use]
    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    /// Whether the pass wrote `path`.
    #[must_use]
    pub fn wrote(&self, path: &str) -> bool {
        self.writes.iter().any(|p| p == path)
    }

    /// Leaves visited whose value already matched the source.
    #[must_use]
    pub fn unchanged(&self) -> usize {
        self.unchanged
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// True when the pass saw no shape mismatches.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Reconcile every field of `target` against `source`.
///
/// Equivalent to [`reconcile_projected`] with a projection of all target
/// field names in name order.
pub fn reconcile(target: &mut FieldGroup, source: &Value) -> ReconcileReport {
    let projection: Projection = target.names().collect();
    reconcile_projected(&projection, target, source)
}

/// Reconcile the projected fields of `target` against `source`.
///
/// Walks `projection` in order. Leaves are written on mismatch only;
/// groups recurse over all of their own children. Returns a report of
/// writes, untouched leaves, and diagnostics. Never fails.
pub fn reconcile_projected(
    projection: &Projection,
    target: &mut FieldGroup,
    source: &Value,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    match source.as_object() {
        Some(map) => {
            reconcile_group(projection, target, map, "", &mut report);
        }
        None => {
            warn!("binding skipped: source is not an object");
            report.diagnostics.push(Diagnostic::NullSource {
                path: String::new(),
            });
        }
    }
    debug!(
        writes = report.writes.len(),
        unchanged = report.unchanged,
        diagnostics = report.diagnostics.len(),
        "reconcile pass complete"
    );
    report
}

fn reconcile_group(
    projection: &Projection,
    target: &mut FieldGroup,
    source: &Map<String, Value>,
    path: &str,
    report: &mut ReconcileReport,
) {
    for name in projection.fields() {
        let child_path = join_path(path, name);
        let Some(node) = target.child_mut(name) else {
            warn!(path = %child_path, "no target field for projected name");
            report.diagnostics.push(Diagnostic::MissingTarget {
                path: child_path,
            });
            continue;
        };

        match node {
            FieldNode::Leaf(leaf) => {
                let incoming = source.get(name);
                let differs = match incoming {
                    Some(value) => leaf.value() != value,
                    None => *leaf.value() != Value::Null,
                };
                if differs {
                    trace!(path = %child_path, "leaf written");
                    leaf.set(incoming.cloned().unwrap_or(Value::Null));
                    report.writes.push(child_path);
                } else {
                    report.unchanged += 1;
                }
            }
            FieldNode::Group(group) => match source.get(name).and_then(Value::as_object) {
                Some(nested) => {
                    let sub: Projection = group.names().collect();
                    reconcile_group(&sub, group, nested, &child_path, report);
                }
                None => {
                    warn!(path = %child_path, "binding skipped: source is null");
                    report.diagnostics.push(Diagnostic::NullSource {
                        path: child_path,
                    });
                }
            },
        }
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
