//! Domain model for ordered task documents.
//!
//! The board domain models task identity, category membership, ordinal
//! positioning, and the partial-update patch semantics, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod event;
mod ids;
mod task;

pub use error::{ParseTaskIdError, TaskDomainError};
pub use event::{Placement, TaskChange};
pub use ids::{CategoryName, Position, TaskId};
pub use task::{TaskDocument, TaskDraft, TaskPatch};
