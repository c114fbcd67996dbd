//! User document keyed by validated email address.

use super::IdentityDomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Validated, normalised email address uniquely keying a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Normalises by trimming and lowercasing. Validation is structural
    /// only: one `@` with non-empty sides and no whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidEmail`] when the value does
    /// not have that shape.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let is_valid = !local.is_empty()
            && !domain.is_empty()
            && parts.next().is_none()
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(IdentityDomainError::InvalidEmail(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the email address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored user document: a unique email plus an opaque profile map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    email: EmailAddress,
    #[serde(flatten)]
    profile: Map<String, Value>,
}

impl UserDocument {
    /// Assembles a user document from an email and an opaque profile.
    ///
    /// Any `email` key inside the profile map is dropped so the flattened
    /// serialisation cannot shadow the typed key.
    #[must_use]
    pub fn new(email: EmailAddress, mut profile: Map<String, Value>) -> Self {
        profile.remove("email");
        Self { email, profile }
    }

    /// Returns the unique email key.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the opaque profile fields.
    #[must_use]
    pub const fn profile(&self) -> &Map<String, Value> {
        &self.profile
    }
}
