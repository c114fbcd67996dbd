//! Change events emitted after every successful task mutation.
//!
//! The payload shape varies by originating operation: create and update
//! carry the full canonical document, reorder carries only the partial
//! identifiers, and delete carries the raw id string. The asymmetry is part
//! of the existing wire contract; connected clients depend on the shape per
//! event kind, so it is reproduced here rather than normalised.

use super::{CategoryName, Position, TaskDocument, TaskId};
use serde::Serialize;
use serde_json::Value;

/// Partial identifiers acknowledging a completed reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Identifier of the moved task.
    pub id: TaskId,
    /// Category the task now belongs to.
    pub category: CategoryName,
    /// Ordinal position the task now occupies.
    #[serde(rename = "index")]
    pub position: Position,
}

/// A successful task mutation, as broadcast to observers.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskChange {
    /// A task was created; carries the full canonical document.
    Created(TaskDocument),
    /// A task's fields were updated; carries the full post-update document.
    Updated(TaskDocument),
    /// A task was moved; carries only the partial identifiers.
    Reordered(Placement),
    /// A task was deleted; carries the raw id.
    Deleted(TaskId),
}

impl TaskChange {
    /// Wire event name shared by all task mutations.
    pub const EVENT_NAME: &'static str = "task-updated";

    /// Returns the wire payload for this change.
    #[must_use]
    pub fn payload(&self) -> Value {
        // Document and placement serialisation cannot fail: every key is a
        // string and every value is already JSON.
        match self {
            Self::Created(document) | Self::Updated(document) => {
                serde_json::to_value(document).unwrap_or(Value::Null)
            }
            Self::Reordered(placement) => {
                serde_json::to_value(placement).unwrap_or(Value::Null)
            }
            Self::Deleted(id) => Value::String(id.to_string()),
        }
    }
}
