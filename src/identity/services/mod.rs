//! Orchestration services for user identity.

pub mod upsert;

pub use upsert::{IdentityService, IdentityServiceError, IdentityServiceResult};
