//! Domain model for user identity.

mod error;
mod user;

pub use error::IdentityDomainError;
pub use user::{EmailAddress, UserDocument};
