//! Unit tests for the board module.
//!
//! Tests are organised by layer: domain value types and patch semantics,
//! ordering engine behaviour over the in-memory store, and service
//! orchestration including broadcast counts and payload shapes.

mod domain_tests;
