//! Task service: CRUD over task documents with ordering and fan-out.
//!
//! Every operation validates inbound identifiers before touching the store,
//! delegates position maintenance to the [`OrderingEngine`], persists via
//! the store port, and hands the canonical result to the notifier port.
//! Successful mutations emit exactly one broadcast; failed ones emit none.

use crate::board::{
    domain::{
        CategoryName, ParseTaskIdError, Placement, Position, TaskChange, TaskDocument,
        TaskDomainError, TaskDraft, TaskId, TaskPatch,
    },
    ports::{ChangeNotifier, TaskStore, TaskStoreError},
    services::ordering::{OrderingEngine, OrderingError},
};
use mockable::Clock;
use serde_json::{Map, Value};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Success acknowledgment body for a completed reorder.
pub const REORDER_ACK_MESSAGE: &str = "Task reordered successfully";

/// Success acknowledgment body for a completed delete.
pub const DELETE_ACK_MESSAGE: &str = "Task deleted successfully";

/// How the position of a newly created task is chosen.
///
/// The observed contract is caller-specified; append-at-end is offered as a
/// configuration point for deployments that prefer server-computed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementPolicy {
    /// Use the position carried by the draft (defaulting to the front).
    #[default]
    CallerSpecified,
    /// Ignore the draft position and append after the category's last task.
    AppendAtEnd,
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The inbound identifier does not parse as a task id.
    #[error(transparent)]
    MalformedId(#[from] ParseTaskIdError),
    /// Domain validation of an inbound value failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The referenced task is absent, or an update changed nothing.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

impl From<OrderingError> for TaskServiceError {
    fn from(err: OrderingError) -> Self {
        match err {
            OrderingError::NotFound(id) => Self::NotFound(id),
            OrderingError::Store(store_err) => Self::Store(store_err),
        }
    }
}

/// Transport-facing classification of a service error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed identifier or out-of-range value; maps to 400.
    InvalidArgument,
    /// Referenced entity absent (or update had no effect); maps to 404.
    NotFound,
    /// Underlying persistence failure; maps to 500.
    StoreFailure,
}

impl TaskServiceError {
    /// Returns the error taxonomy class.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MalformedId(_) | Self::Domain(_) => ErrorClass::InvalidArgument,
            Self::NotFound(_) => ErrorClass::NotFound,
            Self::Store(_) => ErrorClass::StoreFailure,
        }
    }

    /// Returns the generic client-safe `{message}` body.
    ///
    /// Internal detail never leaks to clients; the full error is logged
    /// server-side before the response is produced.
    #[must_use]
    pub const fn client_message(&self) -> &'static str {
        match self.class() {
            ErrorClass::InvalidArgument => "Invalid request",
            ErrorClass::NotFound => "Task not found",
            ErrorClass::StoreFailure => "Internal server error",
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task CRUD orchestration service.
#[derive(Clone)]
pub struct TaskService<S, N, C>
where
    S: TaskStore,
    N: ChangeNotifier,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    engine: OrderingEngine<S>,
    notifier: Arc<N>,
    clock: Arc<C>,
    policy: PlacementPolicy,
}

impl<S, N, C> TaskService<S, N, C>
where
    S: TaskStore,
    N: ChangeNotifier,
    C: Clock + Send + Sync,
{
    /// Creates a task service with the default placement policy.
    #[must_use]
    pub fn new(store: Arc<S>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        let engine = OrderingEngine::new(Arc::clone(&store));
        Self {
            store,
            engine,
            notifier,
            clock,
            policy: PlacementPolicy::default(),
        }
    }

    /// Overrides the placement policy for newly created tasks.
    #[must_use]
    pub fn with_policy(mut self, policy: PlacementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns all tasks ordered by ascending position across categories.
    ///
    /// This is also the consistency recovery path: an observer that missed
    /// broadcasts re-fetches the full list to resynchronise.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] when the store fails.
    pub async fn list(&self) -> TaskServiceResult<Vec<TaskDocument>> {
        let result = self.store.list_ordered().await.map_err(Into::into);
        log_failure("list", &result);
        result
    }

    /// Creates a task from a draft, making room at the requested slot.
    ///
    /// Stamps the creation timestamp, lets the store assign the identifier,
    /// and broadcasts the full canonical document. The returned document's
    /// id is the insertion acknowledgment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] when a store operation fails.
    pub async fn create(&self, draft: TaskDraft) -> TaskServiceResult<TaskDocument> {
        let result = self.create_impl(draft).await;
        log_failure("create", &result);
        result
    }

    async fn create_impl(&self, draft: TaskDraft) -> TaskServiceResult<TaskDocument> {
        let position = match self.policy {
            PlacementPolicy::CallerSpecified => draft.position(),
            PlacementPolicy::AppendAtEnd => self
                .store
                .max_position(draft.category())
                .await?
                .map_or(Position::ZERO, Position::next),
        };
        let draft = draft.with_position(position);

        self.engine.make_room(draft.category(), position).await?;
        let document = self.store.insert(draft, self.clock.utc()).await?;
        debug!(id = %document.id(), category = %document.category(), "task created");
        self.notifier.notify(&TaskChange::Created(document.clone()));
        Ok(document)
    }

    /// Merges a partial update into the stored document.
    ///
    /// Fails with [`TaskServiceError::NotFound`] when no stored field
    /// actually changed — deliberately conflating a missing id with a no-op
    /// patch, matching the wire contract clients rely on. On success the full
    /// post-update
    /// document is reloaded, broadcast, and returned.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::MalformedId`] or
    /// [`TaskServiceError::Domain`] before any store access,
    /// [`TaskServiceError::NotFound`] when nothing was modified, and
    /// [`TaskServiceError::Store`] when the store fails.
    pub async fn update(
        &self,
        raw_id: &str,
        patch: Map<String, Value>,
    ) -> TaskServiceResult<TaskDocument> {
        let result = self.update_impl(raw_id, patch).await;
        log_failure("update", &result);
        result
    }

    async fn update_impl(
        &self,
        raw_id: &str,
        patch: Map<String, Value>,
    ) -> TaskServiceResult<TaskDocument> {
        let id = TaskId::from_str(raw_id)?;
        let patch = TaskPatch::from_map(patch)?;

        if !self.store.apply_patch(id, &patch).await? {
            return Err(TaskServiceError::NotFound(id));
        }
        let document = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;
        debug!(%id, "task updated");
        self.notifier.notify(&TaskChange::Updated(document.clone()));
        Ok(document)
    }

    /// Moves a task to a category and position via the ordering engine.
    ///
    /// Broadcasts only the partial identifiers `{id, category, index}`, not
    /// the full document — an intentional asymmetry of the wire contract.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::MalformedId`] or
    /// [`TaskServiceError::Domain`] before any store access,
    /// [`TaskServiceError::NotFound`] when the task is absent, and
    /// [`TaskServiceError::Store`] when the store fails.
    pub async fn reorder(
        &self,
        raw_id: &str,
        category: &str,
        index: i64,
    ) -> TaskServiceResult<Placement> {
        let result = self.reorder_impl(raw_id, category, index).await;
        log_failure("reorder", &result);
        result
    }

    async fn reorder_impl(
        &self,
        raw_id: &str,
        category: &str,
        index: i64,
    ) -> TaskServiceResult<Placement> {
        let id = TaskId::from_str(raw_id)?;
        let category = CategoryName::new(category)?;
        let position = Position::new(index)?;

        let placement = self.engine.reorder(id, category, position).await?;
        debug!(%id, category = %placement.category, position = %placement.position, "task reordered");
        self.notifier
            .notify(&TaskChange::Reordered(placement.clone()));
        Ok(placement)
    }

    /// Deletes a task by identifier.
    ///
    /// Deletion is immediate and irreversible; the broadcast carries the
    /// raw id string.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::MalformedId`] before any store access,
    /// [`TaskServiceError::NotFound`] when no document existed, and
    /// [`TaskServiceError::Store`] when the store fails.
    pub async fn delete(&self, raw_id: &str) -> TaskServiceResult<()> {
        let result = self.delete_impl(raw_id).await;
        log_failure("delete", &result);
        result
    }

    async fn delete_impl(&self, raw_id: &str) -> TaskServiceResult<()> {
        let id = TaskId::from_str(raw_id)?;
        if !self.store.delete(id).await? {
            return Err(TaskServiceError::NotFound(id));
        }
        debug!(%id, "task deleted");
        self.notifier.notify(&TaskChange::Deleted(id));
        Ok(())
    }
}

/// Logs a failed operation with context before the error is returned.
fn log_failure<T>(operation: &'static str, result: &TaskServiceResult<T>) {
    if let Err(err) = result {
        match err.class() {
            ErrorClass::StoreFailure => {
                error!(operation, error = %err, "task operation failed");
            }
            ErrorClass::InvalidArgument | ErrorClass::NotFound => {
                warn!(operation, error = %err, "task operation rejected");
            }
        }
    }
}
