//! Error types for board domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The category label is empty after trimming.
    #[error("category must not be empty")]
    EmptyCategory,

    /// The requested ordinal position is negative.
    #[error("invalid position {0}, expected a non-negative integer")]
    NegativePosition(i64),

    /// The category field in a patch is not a string value.
    #[error("category must be a string")]
    NonStringCategory,

    /// The index field in a patch is not an integer value.
    #[error("index must be a non-negative integer")]
    NonIntegerPosition,

    /// A patch attempted to rewrite a server-owned field.
    #[error("field '{0}' is immutable")]
    ImmutableField(String),
}

/// Error returned while parsing task identifiers from inbound requests.
///
/// An identifier is valid iff it parses as the store's native format (a
/// UUID); malformed identifiers are rejected before any store access.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed task identifier: {0}")]
pub struct ParseTaskIdError(pub String);
