//! Ordered, recursively nested key/value container for schema-less vendor data.

use indexmap::IndexMap;

use crate::value::{Scalar, Value};

/// Insertion-ordered mapping from symbolic keys to [`Value`]s.
///
/// Keys are unique within one level. Overwriting a key keeps its original
/// position, so serialization order is the order keys were first introduced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeTree {
    entries: IndexMap<String, Value>,
}

impl AttributeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` at `key`, replacing whatever was there.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Nested tree at `key`, created empty if absent.
    ///
    /// A non-tree value already at `key` is replaced by an empty tree.
    pub fn get_or_create_child(&mut self, key: &str) -> &mut AttributeTree {
        let slot = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Value::Tree(AttributeTree::new()));
        tree_in(slot)
    }

    /// Append `item` to the list at `key`.
    ///
    /// A scalar already at `key` becomes the first list element; a nested tree
    /// is discarded.
    pub fn push(&mut self, key: &str, item: impl Into<Scalar>) {
        let item = item.into();
        let slot = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Value::List(Vec::new()));
        match slot {
            Value::List(items) => items.push(item),
            other => {
                let mut items = match std::mem::replace(other, Value::List(Vec::new())) {
                    Value::Scalar(first) => vec![first],
                    _ => Vec::new(),
                };
                items.push(item);
                *other = Value::List(items);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tree held by `slot`, replacing any scalar or list with an empty tree.
fn tree_in(slot: &mut Value) -> &mut AttributeTree {
    match slot {
        Value::Tree(tree) => tree,
        other => {
            *other = Value::Tree(AttributeTree::new());
            tree_in(other)
        }
    }
}
