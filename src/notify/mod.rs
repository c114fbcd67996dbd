//! Real-time change notification for Corkboard.
//!
//! The notification hub keeps the set of connected observers and fans every
//! task mutation out to all of them, unconditionally and without
//! per-observer filtering. There is no topic scoping, no delivery
//! acknowledgment, and no backfill: an observer that reconnects after
//! missing events recovers only by re-fetching the full task list.

mod hub;

pub use hub::{Envelope, NotificationHub, ObserverId, WELCOME_EVENT, WELCOME_MESSAGE};

#[cfg(test)]
mod tests;
