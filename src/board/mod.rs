//! Ordered task management for Corkboard.
//!
//! This module implements the board core: task documents carrying a
//! per-category ordinal position, the ordering engine that re-establishes
//! position uniqueness when a task is created into or moved onto an occupied
//! slot, and the task service exposing list/create/update/reorder/delete.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
