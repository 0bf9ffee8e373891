#![forbid(unsafe_code)]

//! Projections: ordered field subsets, and the unconditional copier.
//!
//! A [`Projection`] names the fields an operation touches, in the order it
//! touches them. The copier functions move projected fields between plain
//! objects with no equality check and no recursion; a field the source
//! lacks is written as [`Value::Null`]. For the conditional, recursive
//! variant over field trees, see [`reconcile`](crate::reconcile).

use serde_json::{Map, Value};

/// An ordered list of field names selecting a subset of an object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    fields: Vec<String>,
}

impl Projection {
    /// Build from anything yielding field names.
    ///
    /// ```
    /// use rxbind::projection::Projection;
    ///
    /// let projection = Projection::of(["name", "email"]);
    /// assert_eq!(projection.len(), 2);
    /// ```
    #[must_use]
    pub fn of<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Field names in projection order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Projection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::of(iter)
    }
}

// ---------------------------------------------------------------------------
// Copier
// ---------------------------------------------------------------------------

/// Copy every projected field from `source` into `target`, unconditionally.
///
/// Existing target entries are overwritten; fields the source lacks are
/// written as [`Value::Null`]. Fields outside the projection are left
/// untouched.
pub fn copy_projection(
    projection: &Projection,
    target: &mut Map<String, Value>,
    source: &Map<String, Value>,
) {
    for name in projection.fields() {
        let value = source.get(name).cloned().unwrap_or(Value::Null);
        target.insert(name.to_string(), value);
    }
}

/// Build a fresh object holding only the projected fields of `source`.
#[must_use]
pub fn project(projection: &Projection, source: &Map<String, Value>) -> Value {
    let mut out = Map::new();
    copy_projection(projection, &mut out, source);
    Value::Object(out)
}

/// Dispatch mode: hand the projected subset of `source` to a consumer
/// instead of writing it anywhere.
pub fn dispatch_projection(
    projection: &Projection,
    source: &Map<String, Value>,
    dispatch: impl FnOnce(Value),
) {
    dispatch(project(projection, source));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
