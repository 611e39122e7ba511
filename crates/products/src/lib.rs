//! Catalog feed messages: products with their category data, and
//! parent/child relationships between catalog items.
//!
//! Entities are configured through builder blocks and rendered through
//! [`feedforge_document::FeedEntity`]; nothing here performs IO.

pub mod dimensions;
pub mod product;
pub mod relationship;

pub use dimensions::Dimensions;
pub use product::{DEFAULT_UPC_TYPE, Product};
pub use relationship::{Relation, Relationship};
