//! Store port for task document persistence and ordering updates.
//!
//! This is the contract of the abstract document store: finds, inserts,
//! partial updates, and deletes over the task collection, plus the two
//! ordering-specific writes the engine relies on. Each method is a single
//! atomic storage operation; sequences of calls are not atomic as a unit.

use crate::board::domain::{CategoryName, Position, TaskDocument, TaskDraft, TaskId, TaskPatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task document persistence contract.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every task document ordered by ascending position.
    ///
    /// The sort key is global, not grouped by category; callers group
    /// client-side.
    async fn list_ordered(&self) -> TaskStoreResult<Vec<TaskDocument>>;

    /// Persists a draft, assigning the document identifier.
    ///
    /// Returns the canonical document as stored.
    async fn insert(
        &self,
        draft: TaskDraft,
        created_at: DateTime<Utc>,
    ) -> TaskStoreResult<TaskDocument>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<TaskDocument>>;

    /// Finds the task occupying `(category, position)`, if any.
    async fn find_at(
        &self,
        category: &CategoryName,
        position: Position,
    ) -> TaskStoreResult<Option<TaskDocument>>;

    /// Returns the highest occupied position in the category.
    ///
    /// Returns `None` when the category holds no tasks.
    async fn max_position(&self, category: &CategoryName) -> TaskStoreResult<Option<Position>>;

    /// Atomically shifts every task in `category` at or beyond `from` one
    /// slot further from the front.
    ///
    /// A task named by `exclude` is skipped by identity, so a task being
    /// moved within its own category is never double-counted. Returns the
    /// number of tasks shifted.
    async fn shift_up_from(
        &self,
        category: &CategoryName,
        from: Position,
        exclude: Option<TaskId>,
    ) -> TaskStoreResult<u64>;

    /// Sets the category and position of a single task.
    ///
    /// Returns whether a document was updated.
    async fn set_placement(
        &self,
        id: TaskId,
        category: &CategoryName,
        position: Position,
    ) -> TaskStoreResult<bool>;

    /// Merges a patch into the stored document.
    ///
    /// Returns whether any stored field actually changed. A missing id and
    /// a no-op patch both report `false`; the store does not distinguish
    /// them.
    async fn apply_patch(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<bool>;

    /// Removes a task by identifier.
    ///
    /// Returns whether a document existed and was removed.
    async fn delete(&self, id: TaskId) -> TaskStoreResult<bool>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
