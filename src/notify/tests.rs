//! Unit tests for the observer registry and broadcast fan-out.

use super::{Envelope, NotificationHub, WELCOME_EVENT, WELCOME_MESSAGE};
use crate::board::domain::{TaskChange, TaskId};
use rstest::{fixture, rstest};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;

#[fixture]
fn hub() -> NotificationHub {
    NotificationHub::new()
}

fn drain(receiver: &mut UnboundedReceiver<Envelope>) -> Vec<Envelope> {
    let mut envelopes = Vec::new();
    while let Ok(envelope) = receiver.try_recv() {
        envelopes.push(envelope);
    }
    envelopes
}

#[rstest]
fn welcome_is_the_first_message_per_connection(hub: NotificationHub) {
    let (_, mut receiver) = hub.register();
    let envelopes = drain(&mut receiver);

    assert_eq!(
        envelopes,
        vec![Envelope {
            event: WELCOME_EVENT.to_owned(),
            payload: Value::String(WELCOME_MESSAGE.to_owned()),
        }]
    );
}

#[rstest]
fn broadcast_reaches_every_registered_observer(hub: NotificationHub) {
    let (_, mut first) = hub.register();
    let (_, mut second) = hub.register();
    let id = TaskId::new();

    hub.broadcast_all(&TaskChange::Deleted(id));

    for receiver in [&mut first, &mut second] {
        let envelopes = drain(receiver);
        assert_eq!(envelopes.len(), 2);
        assert_eq!(
            envelopes.get(1),
            Some(&Envelope {
                event: TaskChange::EVENT_NAME.to_owned(),
                payload: Value::String(id.to_string()),
            })
        );
    }
}

#[rstest]
fn unregistered_observer_receives_nothing_further(hub: NotificationHub) {
    let (id, mut receiver) = hub.register();
    drain(&mut receiver);

    assert!(hub.unregister(id));
    assert!(!hub.unregister(id));
    hub.broadcast_all(&TaskChange::Deleted(TaskId::new()));

    assert!(drain(&mut receiver).is_empty());
    assert_eq!(hub.observer_count(), 0);
}

#[rstest]
fn closed_observer_channels_are_pruned_on_broadcast(hub: NotificationHub) {
    let (_, receiver) = hub.register();
    let (_, mut live) = hub.register();
    drop(receiver);
    assert_eq!(hub.observer_count(), 2);

    hub.broadcast_all(&TaskChange::Deleted(TaskId::new()));

    assert_eq!(hub.observer_count(), 1);
    assert_eq!(drain(&mut live).len(), 2);
}
