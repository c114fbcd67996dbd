//! In-memory task store, the reference implementation of the store port.
//!
//! Every trait method runs under a single lock guard, making each storage
//! operation atomic on its own. The engine's find-shift-set sequence spans
//! several operations and therefore is not atomic as a whole; that matches
//! the store contract, not a shortcut of this adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{CategoryName, Position, TaskDocument, TaskDraft, TaskId, TaskPatch},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, TaskDocument>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list_ordered(&self) -> TaskStoreResult<Vec<TaskDocument>> {
        let state = self.state.read().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut documents: Vec<TaskDocument> = state.tasks.values().cloned().collect();
        documents.sort_by_key(|document| (document.position(), document.created_at()));
        Ok(documents)
    }

    async fn insert(
        &self,
        draft: TaskDraft,
        created_at: DateTime<Utc>,
    ) -> TaskStoreResult<TaskDocument> {
        let mut state = self.state.write().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let document = TaskDocument::from_draft(TaskId::new(), draft, created_at);
        state.tasks.insert(document.id(), document.clone());
        Ok(document)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<TaskDocument>> {
        let state = self.state.read().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_at(
        &self,
        category: &CategoryName,
        position: Position,
    ) -> TaskStoreResult<Option<TaskDocument>> {
        let state = self.state.read().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let occupant = state
            .tasks
            .values()
            .find(|document| document.category() == category && document.position() == position)
            .cloned();
        Ok(occupant)
    }

    async fn max_position(&self, category: &CategoryName) -> TaskStoreResult<Option<Position>> {
        let state = self.state.read().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let highest = state
            .tasks
            .values()
            .filter(|document| document.category() == category)
            .map(TaskDocument::position)
            .max();
        Ok(highest)
    }

    async fn shift_up_from(
        &self,
        category: &CategoryName,
        from: Position,
        exclude: Option<TaskId>,
    ) -> TaskStoreResult<u64> {
        let mut state = self.state.write().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut shifted = 0;
        for document in state.tasks.values_mut() {
            if document.category() == category
                && document.position() >= from
                && exclude != Some(document.id())
            {
                document.shift_up();
                shifted += 1;
            }
        }
        Ok(shifted)
    }

    async fn set_placement(
        &self,
        id: TaskId,
        category: &CategoryName,
        position: Position,
    ) -> TaskStoreResult<bool> {
        let mut state = self.state.write().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let Some(document) = state.tasks.get_mut(&id) else {
            return Ok(false);
        };
        document.place(category.clone(), position);
        Ok(true)
    }

    async fn apply_patch(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<bool> {
        let mut state = self.state.write().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let Some(document) = state.tasks.get_mut(&id) else {
            return Ok(false);
        };
        Ok(document.apply_patch(patch))
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<bool> {
        let mut state = self.state.write().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.remove(&id).is_some())
    }
}
