//! `feedforge-builder`: uniform call syntax for populating feed entities.
//!
//! A [`DynamicBuilder`] is bound to one [`FieldTarget`] and turns every
//! `dispatch(name, args, block)` into either a fixed-field assignment or a
//! mutation of a nested [`feedforge_core::AttributeTree`].

pub mod args;
pub mod dispatch;
pub mod target;

pub use args::Args;
pub use dispatch::{Block, DispatchMode, DynamicBuilder};
pub use target::FieldTarget;

/// Build a `Vec<Value>` argument list for [`DynamicBuilder::call`].
///
/// ```ignore
/// b.call("package_weight", feed_args![2, "kg"])?;
/// ```
#[macro_export]
macro_rules! feed_args {
    ($($arg:expr),* $(,)?) => {
        vec![$(::feedforge_core::Value::from($arg)),*]
    };
}
