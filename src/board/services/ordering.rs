//! Ordering engine: per-category position maintenance for moved tasks.
//!
//! The engine re-establishes the uniqueness invariant for a target slot by
//! probing occupancy, bulk-shifting the occupant and its followers one slot
//! back, and then writing the moved task's placement. The three store calls
//! are each atomic but the sequence as a whole is not; two concurrent moves
//! into one category can interleave and leave a duplicate position. That gap
//! is part of the existing contract; a transactional or compare-and-set
//! variant is a hardening left to stricter deployments.

use crate::board::{
    domain::{CategoryName, Placement, Position, TaskId},
    ports::{TaskStore, TaskStoreError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors returned by ordering engine operations.
#[derive(Debug, Error)]
pub enum OrderingError {
    /// The task to move does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Position maintenance engine over a task store.
#[derive(Debug, Clone)]
pub struct OrderingEngine<S>
where
    S: TaskStore,
{
    store: Arc<S>,
}

impl<S> OrderingEngine<S>
where
    S: TaskStore,
{
    /// Creates an engine over the given store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Makes room at `(category, position)` for a task about to be created.
    ///
    /// When the slot is occupied, every task in the category at or beyond
    /// the slot shifts one position back. Returns the number of tasks
    /// displaced.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Store`] when a store operation fails.
    pub async fn make_room(
        &self,
        category: &CategoryName,
        position: Position,
    ) -> Result<u64, OrderingError> {
        if self.store.find_at(category, position).await?.is_none() {
            return Ok(0);
        }
        let shifted = self.store.shift_up_from(category, position, None).await?;
        debug!(%category, %position, shifted, "made room for incoming task");
        Ok(shifted)
    }

    /// Moves a task to `(category, position)`, displacing any occupant.
    ///
    /// The moving task is excluded from the shift by identity, so a move
    /// within the same category never double-counts it. The shift and the
    /// placement write are separate atomic operations; see the module
    /// documentation for the concurrency caveat.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::NotFound`] when the task does not exist and
    /// [`OrderingError::Store`] when a store operation fails.
    pub async fn reorder(
        &self,
        id: TaskId,
        category: CategoryName,
        position: Position,
    ) -> Result<Placement, OrderingError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(OrderingError::NotFound(id))?;

        let occupant = self.store.find_at(&category, position).await?;
        if occupant.is_some_and(|document| document.id() != id) {
            let shifted = self
                .store
                .shift_up_from(&category, position, Some(id))
                .await?;
            debug!(%id, %category, %position, shifted, "displaced occupant for reorder");
        }

        if !self.store.set_placement(id, &category, position).await? {
            // The task vanished between the probe and the write.
            return Err(OrderingError::NotFound(id));
        }

        Ok(Placement {
            id,
            category,
            position,
        })
    }
}
