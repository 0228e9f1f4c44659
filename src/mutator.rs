//! The periodic price mutation loop.
//!
//! One background task, started once at process startup, applies a
//! random price mutation every interval and hands the resulting
//! snapshot to the broadcaster for fan-out.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::broadcast::Broadcaster;
use crate::store::SharedItemStore;

/// Default time between mutation cycles.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(2);

/// The mutation loop.
///
/// [`Mutator::spawn`] consumes the value, so a second start of the
/// same loop is a compile error rather than a duplicated timer.
#[derive(Debug)]
pub struct Mutator {
    store: SharedItemStore,
    broadcaster: Arc<Broadcaster>,
    interval: Duration,
}

impl Mutator {
    /// Creates a mutator over the given store and broadcaster.
    pub fn new(store: SharedItemStore, broadcaster: Arc<Broadcaster>, interval: Duration) -> Self {
        Self {
            store,
            broadcaster,
            interval,
        }
    }

    /// Spawns the mutation loop.
    ///
    /// Every interval: mutate one item, publish the snapshot. Delivery
    /// failures are absorbed inside [`Broadcaster::publish`], so the
    /// loop itself has no failure path; it runs until the shutdown
    /// channel flips (or its sender is dropped).
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            tracing::info!(
                interval_ms = self.interval.as_millis() as u64,
                "Mutation loop started"
            );

            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; skip it so the
            // first mutation lands one full interval after startup.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let snapshot = self.store.mutate_one();
                        let delivered = self.broadcaster.publish(&snapshot);
                        tracing::debug!(subscribers = delivered, "Mutation cycle published");
                    }
                    _ = shutdown.changed() => break,
                }
            }

            tracing::info!("Mutation loop stopped");
        })
    }
}
