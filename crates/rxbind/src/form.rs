#![forbid(unsafe_code)]

//! Field trees: the writable target of tree reconciliation.
//!
//! A [`FieldGroup`] owns named children, each either a [`FieldLeaf`]
//! holding one value or a nested group. The shape mirrors a form: groups
//! are the branches, leaves are the individual controls. Children are kept
//! in name order, so traversal and snapshots are deterministic.
//!
//! Leaves store plain [`Value`]s. A leaf may hold any JSON value, including
//! an object; nesting only exists where the tree uses a group.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// One node of a field tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldNode {
    Leaf(FieldLeaf),
    Group(FieldGroup),
}

impl FieldNode {
    /// Shorthand for a leaf node.
    #[must_use]
    pub fn leaf(value: Value) -> Self {
        FieldNode::Leaf(FieldLeaf::new(value))
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, FieldNode::Leaf(_))
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, FieldNode::Group(_))
    }

    #[must_use]
    pub fn as_leaf(&self) -> Option<&FieldLeaf> {
        match self {
            FieldNode::Leaf(leaf) => Some(leaf),
            FieldNode::Group(_) => None,
        }
    }

    #[must_use]
    pub fn as_group(&self) -> Option<&FieldGroup> {
        match self {
            FieldNode::Group(group) => Some(group),
            FieldNode::Leaf(_) => None,
        }
    }

    /// Snapshot of this node: a leaf's value, or a group's object.
    #[must_use]
    pub fn value(&self) -> Value {
        match self {
            FieldNode::Leaf(leaf) => leaf.value().clone(),
            FieldNode::Group(group) => group.value(),
        }
    }
}

impl From<FieldLeaf> for FieldNode {
    fn from(leaf: FieldLeaf) -> Self {
        FieldNode::Leaf(leaf)
    }
}

impl From<FieldGroup> for FieldNode {
    fn from(group: FieldGroup) -> Self {
        FieldNode::Group(group)
    }
}

impl From<Value> for FieldNode {
    fn from(value: Value) -> Self {
        FieldNode::leaf(value)
    }
}

// ---------------------------------------------------------------------------
// FieldLeaf
// ---------------------------------------------------------------------------

/// A single writable field holding one value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldLeaf {
    value: Value,
}

impl FieldLeaf {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Overwrite the stored value.
    pub fn set(&mut self, value: Value) {
        self.value = value;
    }
}

impl Default for FieldLeaf {
    fn default() -> Self {
        Self::new(Value::Null)
    }
}

// ---------------------------------------------------------------------------
// FieldGroup
// ---------------------------------------------------------------------------

/// A branch of the field tree: named children in name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldGroup {
    children: BTreeMap<String, FieldNode>,
}

impl FieldGroup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert). Accepts a leaf, a group,
    /// or a bare [`Value`] (stored as a leaf).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, node: impl Into<FieldNode>) -> Self {
        self.insert(name, node);
        self
    }

    /// Add or replace the child `name`.
    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<FieldNode>) {
        self.children.insert(name.into(), node.into());
    }

    #[must_use]
    pub fn child(&self, name: &str) -> Option<&FieldNode> {
        self.children.get(name)
    }

    #[must_use]
    pub fn child_mut(&mut self, name: &str) -> Option<&mut FieldNode> {
        self.children.get_mut(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Child names in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Snapshot the whole subtree as a plain object.
    #[must_use]
    pub fn value(&self) -> Value {
        let map: Map<String, Value> = self
            .children
            .iter()
            .map(|(name, node)| (name.clone(), node.value()))
            .collect();
        Value::Object(map)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn address_form() -> FieldGroup {
        FieldGroup::new()
            .with("name", json!(""))
            .with("age", json!(0))
            .with(
                "address",
                FieldGroup::new()
                    .with("city", json!(""))
                    .with("zip", json!("")),
            )
    }

    #[test]
    fn builder_accepts_values_leaves_and_groups() {
        let form = FieldGroup::new()
            .with("plain", json!(1))
            .with("leaf", FieldLeaf::new(json!(2)))
            .with("group", FieldGroup::new());

        assert!(form.child("plain").is_some_and(FieldNode::is_leaf));
        assert!(form.child("leaf").is_some_and(FieldNode::is_leaf));
        assert!(form.child("group").is_some_and(FieldNode::is_group));
    }

    #[test]
    fn names_are_sorted() {
        let form = address_form();
        let names: Vec<&str> = form.names().collect();
        assert_eq!(names, vec!["address", "age", "name"]);
    }

    #[test]
    fn leaf_set_overwrites() {
        let mut form = address_form();
        let Some(FieldNode::Leaf(leaf)) = form.child_mut("name") else {
            panic!("name should be a leaf");
        };
        leaf.set(json!("Alice"));
        assert_eq!(form.child("name").map(FieldNode::value), Some(json!("Alice")));
    }

    #[test]
    fn nested_child_access() {
        let form = address_form();
        let address = form.child("address").and_then(FieldNode::as_group);
        let city = address.and_then(|g| g.child("city")).and_then(FieldNode::as_leaf);
        assert_eq!(city.map(FieldLeaf::value), Some(&json!("")));
    }

    #[test]
    fn snapshot_reflects_nested_writes() {
        let mut form = address_form();
        if let Some(FieldNode::Group(address)) = form.child_mut("address") {
            if let Some(FieldNode::Leaf(city)) = address.child_mut("city") {
                city.set(json!("NYC"));
            }
        }

        assert_eq!(
            form.value(),
            json!({
                "address": { "city": "NYC", "zip": "" },
                "age": 0,
                "name": ""
            })
        );
    }

    #[test]
    fn leaf_may_hold_an_object_value() {
        let form = FieldGroup::new().with("meta", json!({ "k": 1 }));
        let meta = form.child("meta");
        assert!(meta.is_some_and(FieldNode::is_leaf));
        assert_eq!(meta.map(FieldNode::value), Some(json!({ "k": 1 })));
    }

    #[test]
    fn empty_group_snapshots_to_empty_object() {
        assert_eq!(FieldGroup::new().value(), json!({}));
        assert!(FieldGroup::new().is_empty());
    }
}
