//! Set cache API handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use brickfind_core::CacheStats;

use crate::state::AppState;

/// GET /api/v1/cache/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<CacheStats> {
    Json(state.resolver().cache_stats().await)
}
