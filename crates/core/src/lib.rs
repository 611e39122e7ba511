//! `feedforge-core`: value model shared by every feed document.
//!
//! This crate contains **pure data** primitives (no markup, no IO): scalar values,
//! unit-tagged amounts, and the ordered attribute tree that holds schema-less
//! vendor data.

pub mod attribute_tree;
pub mod error;
pub mod units;
pub mod value;
pub mod value_object;

pub use attribute_tree::AttributeTree;
pub use error::{FeedError, FeedResult};
pub use units::{Currency, Distance, DistanceUnit, Money, ParseUnitError, UnitPair, Weight, WeightUnit};
pub use value::{Scalar, Value};
pub use value_object::ValueObject;
