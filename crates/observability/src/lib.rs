//! Process-wide tracing setup for applications that produce feeds.
//!
//! The library crates only emit `tracing` events; binaries and tests call
//! [`init`] once to install a subscriber.

pub mod tracing;

pub use crate::tracing::{DEFAULT_FILTER, init, init_with_filter};
