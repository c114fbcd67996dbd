//! In-memory user store keyed by unique email.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{EmailAddress, UserDocument},
    ports::{UserStore, UserStoreError, UserStoreResult},
};

/// Thread-safe in-memory user store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    state: Arc<RwLock<HashMap<EmailAddress, UserDocument>>>,
}

impl InMemoryUserStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> UserStoreResult<Option<UserDocument>> {
        let state = self.state.read().map_err(|err| {
            UserStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(email).cloned())
    }

    async fn insert(&self, user: &UserDocument) -> UserStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            UserStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(user.email()) {
            return Err(UserStoreError::DuplicateEmail(user.email().clone()));
        }
        state.insert(user.email().clone(), user.clone());
        Ok(())
    }
}
