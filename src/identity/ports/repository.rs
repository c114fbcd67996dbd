//! Store port for user document persistence and lookup.

use crate::identity::domain::{EmailAddress, UserDocument};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user store operations.
pub type UserStoreResult<T> = Result<T, UserStoreError>;

/// User document persistence contract.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Finds a user by unique email.
    ///
    /// Returns `None` when no user exists with that email.
    async fn find_by_email(&self, email: &EmailAddress)
        -> UserStoreResult<Option<UserDocument>>;

    /// Stores a new user document.
    ///
    /// # Errors
    ///
    /// Returns [`UserStoreError::DuplicateEmail`] when a user with the same
    /// email already exists.
    async fn insert(&self, user: &UserDocument) -> UserStoreResult<()>;
}

/// Errors returned by user store implementations.
#[derive(Debug, Clone, Error)]
pub enum UserStoreError {
    /// A user with the same email already exists.
    #[error("duplicate email: {0}")]
    DuplicateEmail(EmailAddress),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
