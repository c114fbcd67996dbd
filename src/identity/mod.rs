//! User identity management for Corkboard.
//!
//! An external collaborator to the board core: user profiles are upserted
//! by unique email on every login, created once, and never updated or
//! deleted by this subsystem.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
