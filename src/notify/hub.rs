//! Observer registry and broadcast fan-out.

use crate::board::domain::TaskChange;
use crate::board::ports::ChangeNotifier;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

/// Event name of the one-time greeting sent on connect.
pub const WELCOME_EVENT: &str = "welcome";

/// Greeting payload sent once per connection.
pub const WELCOME_MESSAGE: &str = "Welcome to the task board";

/// Unique identifier for a connected observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(Uuid);

impl ObserverId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tagged wire message delivered to observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    /// Event kind: `welcome` or `task-updated`.
    pub event: String,
    /// Event payload; the shape varies by originating operation.
    pub payload: Value,
}

/// Concurrency-safe observer registry with fire-and-forget broadcast.
///
/// The raw observer collection is never exposed; connect and disconnect go
/// through [`register`](Self::register) and
/// [`unregister`](Self::unregister), and fan-out through
/// [`broadcast_all`](Self::broadcast_all). Delivery is best-effort with no
/// backpressure: envelopes queue on unbounded per-observer channels
/// regardless of the observer's read rate.
#[derive(Debug, Clone, Default)]
pub struct NotificationHub {
    observers: Arc<RwLock<HashMap<ObserverId, mpsc::UnboundedSender<Envelope>>>>,
}

impl NotificationHub {
    /// Creates a hub with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new observer and returns its receiving end.
    ///
    /// The one-time welcome envelope is queued before the observer joins
    /// the broadcast set, so it is always the first message received.
    #[must_use]
    pub fn register(&self) -> (ObserverId, mpsc::UnboundedReceiver<Envelope>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        // The paired receiver is still in scope, so this send cannot fail.
        let _welcome = sender.send(Envelope {
            event: WELCOME_EVENT.to_owned(),
            payload: Value::String(WELCOME_MESSAGE.to_owned()),
        });

        let id = ObserverId::new();
        self.write_observers().insert(id, sender);
        debug!(observer = %id, "observer connected");
        (id, receiver)
    }

    /// Removes an observer from the broadcast set.
    ///
    /// No backfill state is kept for it; returns whether it was registered.
    pub fn unregister(&self, id: ObserverId) -> bool {
        let removed = self.write_observers().remove(&id).is_some();
        if removed {
            debug!(observer = %id, "observer disconnected");
        }
        removed
    }

    /// Returns the number of currently registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.read_observers().len()
    }

    /// Broadcasts a change to every registered observer.
    ///
    /// Fire-and-forget: no acknowledgment, no retry. Observers whose
    /// receiving end has been dropped are pruned from the set.
    pub fn broadcast_all(&self, change: &TaskChange) {
        let envelope = Envelope {
            event: TaskChange::EVENT_NAME.to_owned(),
            payload: change.payload(),
        };

        let disconnected: Vec<ObserverId> = {
            let observers = self.read_observers();
            observers
                .iter()
                .filter(|(_, sender)| sender.send(envelope.clone()).is_err())
                .map(|(id, _)| *id)
                .collect()
        };

        for id in &disconnected {
            self.write_observers().remove(id);
            debug!(observer = %id, "pruned closed observer channel");
        }
    }

    fn read_observers(
        &self,
    ) -> RwLockReadGuard<'_, HashMap<ObserverId, mpsc::UnboundedSender<Envelope>>> {
        // A panic while holding the lock leaves the registry intact, so a
        // poisoned guard is still safe to use.
        match self.observers.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_observers(
        &self,
    ) -> RwLockWriteGuard<'_, HashMap<ObserverId, mpsc::UnboundedSender<Envelope>>> {
        match self.observers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl ChangeNotifier for NotificationHub {
    fn notify(&self, change: &TaskChange) {
        self.broadcast_all(change);
    }
}
