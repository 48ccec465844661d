/**
 * Router Configuration
 *
 * Combines the route groups into a single Axum router.
 *
 * # Route Order
 *
 * 1. Vote data routes
 * 2. Topic routes
 * 3. Anything else: a file from the public directory, or 404
 */

use axum::{handler::HandlerWithoutStateExt, http::StatusCode, Router};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use crate::backend::routes::api_routes::{configure_topic_routes, configure_vote_routes};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// Static assets are served at the root from the configured public
/// directory, the same directory that holds the store documents by default,
/// so `/index.html` and `/data.json` resolve to files there.
pub fn create_router(app_state: AppState) -> Router<()> {
    let public_dir = app_state.config.public_dir.clone();
    let static_files = ServeDir::new(public_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    let router = configure_vote_routes(Router::new());
    let router = configure_topic_routes(router);

    router
        .fallback_service(static_files)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 Not Found")
}
