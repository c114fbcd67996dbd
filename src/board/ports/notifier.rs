//! Notifier port for post-mutation change fan-out.

use crate::board::domain::TaskChange;

/// Fire-and-forget broadcast seam between the task service and whatever
/// carries changes to connected observers.
///
/// Delivery is best-effort: no acknowledgment, no retry, and no ordering
/// guarantee relative to a nearly-simultaneous mutation's broadcast. The
/// persistence write is durable before this is invoked.
pub trait ChangeNotifier: Send + Sync {
    /// Broadcasts a change to every currently-connected observer.
    fn notify(&self, change: &TaskChange);
}
