//! Idempotent fetch-or-create of user profiles.

use crate::identity::{
    domain::{EmailAddress, IdentityDomainError, UserDocument},
    ports::{UserStore, UserStoreError},
};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

/// Service-level errors for identity operations.
#[derive(Debug, Error)]
pub enum IdentityServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] UserStoreError),
}

/// Result type for identity service operations.
pub type IdentityServiceResult<T> = Result<T, IdentityServiceError>;

/// User identity orchestration service.
#[derive(Clone)]
pub struct IdentityService<S>
where
    S: UserStore,
{
    store: Arc<S>,
}

impl<S> IdentityService<S>
where
    S: UserStore,
{
    /// Creates an identity service over the given store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the user with the given email, creating it if absent.
    ///
    /// An existing user is returned unchanged: the supplied profile is
    /// never merged into stored fields. Idempotent with respect to repeated
    /// calls with the same email; a concurrent insert racing this call
    /// resolves to the document that won.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Domain`] when the email is malformed
    /// and [`IdentityServiceError::Store`] when persistence fails.
    pub async fn upsert_user(
        &self,
        raw_email: &str,
        profile: Map<String, Value>,
    ) -> IdentityServiceResult<UserDocument> {
        let result = self.upsert_impl(raw_email, profile).await;
        if let Err(err) = &result {
            error!(email = raw_email, error = %err, "user upsert failed");
        }
        result
    }

    async fn upsert_impl(
        &self,
        raw_email: &str,
        profile: Map<String, Value>,
    ) -> IdentityServiceResult<UserDocument> {
        let email = EmailAddress::new(raw_email)?;
        if let Some(existing) = self.store.find_by_email(&email).await? {
            return Ok(existing);
        }

        let user = UserDocument::new(email.clone(), profile);
        match self.store.insert(&user).await {
            Ok(()) => {
                debug!(%email, "user created");
                Ok(user)
            }
            // Another login for the same email won the race; return theirs.
            Err(UserStoreError::DuplicateEmail(_)) => {
                let existing = self.store.find_by_email(&email).await?;
                Ok(existing.unwrap_or(user))
            }
            Err(err) => Err(err.into()),
        }
    }
}
