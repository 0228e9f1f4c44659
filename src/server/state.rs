//! Shared application state for the HTTP server.

use std::sync::Arc;

use crate::broadcast::Broadcaster;
use crate::store::SharedItemStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The item catalog.
    pub store: SharedItemStore,
    /// Subscriber registry for WebSocket fan-out.
    pub broadcaster: Arc<Broadcaster>,
}

impl AppState {
    /// Creates new app state over the given store and broadcaster.
    pub fn new(store: SharedItemStore, broadcaster: Arc<Broadcaster>) -> Self {
        Self { store, broadcaster }
    }
}
