//! Port contracts for the board core.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod notifier;
pub mod store;

pub use notifier::ChangeNotifier;
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
