//! Capability interface shared by fixed-schema entities and attribute trees.

use feedforge_core::{AttributeTree, FeedError, FeedResult};

use crate::args::Args;

/// Something a [`crate::DynamicBuilder`] can be bound to.
///
/// Fixed-schema types answer `supports_field` for their declared names;
/// schema-less storage exposes itself through `dynamic_tree`. A type may do
/// both. Every method has a "supports nothing" default.
pub trait FieldTarget {
    /// Whether `name` is a declared field of this target.
    fn supports_field(&self, _name: &str) -> bool {
        false
    }

    /// Assign a declared field from call arguments.
    fn set_field(&mut self, name: &str, _args: Args<'_>) -> FeedResult<()> {
        Err(FeedError::unknown_field(name))
    }

    /// Nested target for a declared field configured with a block
    /// (dimensions, details, ...). `None` means the field takes no block.
    fn field_target(&mut self, _name: &str) -> Option<&mut dyn FieldTarget> {
        None
    }

    /// Schema-less storage for names that are not declared fields.
    fn dynamic_tree(&mut self) -> Option<&mut AttributeTree> {
        None
    }
}

/// An attribute tree is pure dynamic storage: it declares no fields.
impl FieldTarget for AttributeTree {
    fn dynamic_tree(&mut self) -> Option<&mut AttributeTree> {
        Some(self)
    }
}
