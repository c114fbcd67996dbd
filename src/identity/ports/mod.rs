//! Port contracts for user identity.

pub mod repository;

pub use repository::{UserStore, UserStoreError, UserStoreResult};
