//! Fan-out of item snapshots to connected WebSocket subscribers.
//!
//! The [`Broadcaster`] keeps an explicit registry of subscriber
//! delivery channels. Each subscriber gets its own unbounded queue, so
//! a slow or dead client never delays delivery to the rest; a failed
//! send just drops that one subscriber from the registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use tokio::sync::mpsc;

use crate::store::Item;

/// Identity of one connected subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live subscription handle, returned by [`Broadcaster::connect`].
///
/// Holds the receiving end of the subscriber's delivery queue. The
/// first message in the queue is always the snapshot that was current
/// at connect time.
#[derive(Debug)]
pub struct Subscription {
    /// The subscriber's identity, used to disconnect later.
    pub id: SubscriberId,
    /// Delivery queue of JSON-encoded `update` events.
    pub rx: mpsc::UnboundedReceiver<String>,
}

/// Registry of connected subscribers with snapshot fan-out.
#[derive(Debug, Default)]
pub struct Broadcaster {
    subscribers: Mutex<HashMap<SubscriberId, mpsc::UnboundedSender<String>>>,
    next_id: AtomicU64,
}

impl Broadcaster {
    /// Creates an empty broadcaster.
    pub fn new() -> Self {
        Self::default()
    }

    fn subscribers(&self) -> MutexGuard<'_, HashMap<SubscriberId, mpsc::UnboundedSender<String>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registers a new subscriber and queues one immediate `update`
    /// event carrying the given snapshot to it (and only it).
    pub fn connect(&self, snapshot: &[Item]) -> Subscription {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::unbounded_channel();

        // The receiver is still in hand, so this send cannot fail.
        let _ = tx.send(encode_update(snapshot));
        self.subscribers().insert(id, tx);

        tracing::debug!(subscriber = %id, "Subscriber connected");
        Subscription { id, rx }
    }

    /// Deregisters a subscriber. Removing an already-absent subscriber
    /// is a no-op.
    pub fn disconnect(&self, id: SubscriberId) {
        if self.subscribers().remove(&id).is_some() {
            tracing::debug!(subscriber = %id, "Subscriber disconnected");
        }
    }

    /// Delivers the snapshot to every registered subscriber.
    ///
    /// The payload is encoded once and queued per subscriber. A failed
    /// send means the subscriber's receiving side is gone; it is
    /// removed from the registry and the remaining deliveries proceed.
    /// Returns the number of subscribers that received the event.
    pub fn publish(&self, snapshot: &[Item]) -> usize {
        let payload = encode_update(snapshot);
        let mut subscribers = self.subscribers();

        let dead: Vec<SubscriberId> = subscribers
            .iter()
            .filter(|(_, tx)| tx.send(payload.clone()).is_err())
            .map(|(id, _)| *id)
            .collect();

        for id in dead {
            subscribers.remove(&id);
            tracing::debug!(subscriber = %id, "Dropping subscriber after failed delivery");
        }

        subscribers.len()
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers().len()
    }

    /// Removes every subscriber, closing their delivery queues.
    ///
    /// Called on shutdown so WebSocket pump tasks see end-of-stream
    /// and exit.
    pub fn drain(&self) {
        let mut subscribers = self.subscribers();
        let count = subscribers.len();
        subscribers.clear();
        if count > 0 {
            tracing::info!(subscribers = count, "Drained subscriber registry");
        }
    }
}

/// Encodes an `update` event carrying the full item snapshot.
fn encode_update(items: &[Item]) -> String {
    let message = serde_json::json!({
        "type": "update",
        "data": items,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    serde_json::to_string(&message).unwrap_or_else(|_| "{}".to_string())
}
