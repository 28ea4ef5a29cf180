use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{cache, handlers, sets};
use super::middleware::metrics_middleware;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Sets
        .route("/sets/lookup", get(sets::lookup))
        .route("/sets/default", get(sets::get_default_set))
        .route("/sets/{id}", get(sets::get_set))
        // Cache
        .route("/cache/stats", get(cache::get_stats))
        .with_state(Arc::clone(&state));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        // The lookup page is served from elsewhere and calls us from the browser.
        .layer(CorsLayer::permissive())
}
