//! Identifier and validated scalar types for the board domain.

use super::{ParseTaskIdError, TaskDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a task document.
///
/// Assigned by the store on insert and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a task identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for TaskId {
    type Err = ParseTaskIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| ParseTaskIdError(value.to_owned()))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated category label partitioning tasks for ordering purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryName(String);

impl CategoryName {
    /// Creates a validated category name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyCategory`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyCategory);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the category label as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-negative ordinal position of a task within its category.
///
/// At rest no two tasks in one category share a position; the ordering
/// engine only ever produces contiguous-from-zero sequences through the
/// defined operations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Position(u64);

impl Position {
    /// Front of a category.
    pub const ZERO: Self = Self(0);

    /// Creates a validated position from an inbound integer.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NegativePosition`] when the value is
    /// negative.
    pub const fn new(value: i64) -> Result<Self, TaskDomainError> {
        if value < 0 {
            return Err(TaskDomainError::NegativePosition(value));
        }
        #[expect(clippy::cast_sign_loss, reason = "negative values are rejected above")]
        let ordinal = value as u64;
        Ok(Self(ordinal))
    }

    /// Creates a position from an already non-negative ordinal.
    #[must_use]
    pub const fn from_ordinal(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying ordinal value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the position one slot further from the front.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
