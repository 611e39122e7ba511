//! Feed error model.

use thiserror::Error;

/// Result type used across the feed engine.
pub type FeedResult<T> = Result<T, FeedError>;

/// Feed-level error.
///
/// Every variant is raised synchronously by the call that detects it; nothing in
/// the engine retries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// A structural invariant was violated when an entity finished construction.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A category key has no registered tag.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// A tag or value cannot be represented in the output document.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A builder call named nothing the target understands (strict mode only).
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A known field received arguments it cannot accept.
    #[error("invalid argument for `{field}`: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// Configuration could not be loaded or parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl FeedError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unknown_category(key: impl Into<String>) -> Self {
        Self::UnknownCategory(key.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField(name.into())
    }

    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
