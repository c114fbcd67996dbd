//! Orchestration services for the board core.

pub mod ordering;
pub mod tasks;

pub use ordering::{OrderingEngine, OrderingError};
pub use tasks::{
    ErrorClass, PlacementPolicy, TaskService, TaskServiceError, TaskServiceResult,
    DELETE_ACK_MESSAGE, REORDER_ACK_MESSAGE,
};
