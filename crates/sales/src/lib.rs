//! Order feed messages: acknowledgements and fulfillments.
//!
//! Both borrow the caller's line items (anything implementing [`LineItem`])
//! and render through [`feedforge_document::FeedEntity`].

pub mod line_item;
pub mod order_acknowledgement;
pub mod order_fulfillment;

pub use line_item::{LineItem, OrderItem};
pub use order_acknowledgement::{OrderAcknowledgement, StatusCode};
pub use order_fulfillment::{FulfillmentOptions, OrderFulfillment};
