use axum::routing::{get, post, put};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{cache_handlers, ops_handlers, storage_event_handlers};

pub const ROUTES: &[&str] = &[
    "GET /routes",
    "POST /uframe/events/storage",
    "PUT /uframe/events/storage/:event_id",
    "GET /cache",
    "GET /cache/:key",
    "DELETE /cache/:key",
    "GET /ops/health/live",
    "GET /ops/health/ready",
    "GET /ops/metrics/prometheus",
];

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/routes", get(ops_handlers::list_routes))
        .route(
            "/uframe/events/storage",
            post(storage_event_handlers::create_storage_event),
        )
        .route(
            "/uframe/events/storage/:event_id",
            put(storage_event_handlers::update_storage_event),
        )
        .route("/cache", get(cache_handlers::list_cache_keys))
        .route(
            "/cache/:key",
            get(cache_handlers::get_cache_entry).delete(cache_handlers::clear_cache_entry),
        )
        .route("/ops/health/live", get(ops_handlers::health_live))
        .route("/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
