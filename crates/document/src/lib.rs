//! `feedforge-document`: renders feed entities into XML documents.
//!
//! - [`DocumentSerializer`] builds a node tree through a scoped [`Emitter`] and
//!   writes it out only once the whole tree was built.
//! - [`CategoryDispatcher`] writes schema-less category data under the tag a
//!   [`CategoryRegistry`] assigns to the entity's category key.
//! - [`FeedEntity`] is the handoff point to whatever submits the feed.

pub mod category;
pub mod config;
pub mod entity;
pub mod serializer;
pub mod tag;

pub use category::{CategoryDispatcher, CategoryRegistry};
pub use config::FeedConfig;
pub use entity::{FeedContext, FeedEntity};
pub use serializer::{Document, DocumentSerializer, Element, Emitter, Node, RenderOptions};
