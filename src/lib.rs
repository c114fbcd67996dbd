//! Corkboard: collaborative task board backend core.
//!
//! This crate provides the authoritative logic behind a kanban-style task
//! board: ordered task documents grouped into categories, an ordering engine
//! that keeps per-category positions unique under drag-and-drop moves, and a
//! notification hub that fans every mutation out to connected observers.
//!
//! # Architecture
//!
//! Corkboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (stores, channels)
//!
//! # Modules
//!
//! - [`board`]: Task documents, ordering engine, and task CRUD services
//! - [`notify`]: Observer registry and broadcast fan-out
//! - [`identity`]: Idempotent user upsert keyed by email

pub mod board;
pub mod identity;
pub mod notify;
