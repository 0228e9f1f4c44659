//! Items endpoint.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::server::state::AppState;
use crate::store::Item;

/// GET /api/items - Current item snapshot, in display order.
pub async fn get_items(State(state): State<Arc<AppState>>) -> Json<Vec<Item>> {
    Json(state.store.snapshot())
}
