/**
 * Server Initialization
 *
 * Builds the application state from configuration, checks that the store
 * documents are readable, and assembles the router.
 *
 * # Initialization Process
 *
 * 1. Create the JSON store for the configured files
 * 2. Read both documents once so a corrupt file fails startup loudly
 * 3. Create and configure the router
 */

use axum::Router;
use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// Returns an error if either store document exists but cannot be read or
/// parsed. Missing documents are fine; they are created on first write.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, BackendError> {
    tracing::info!(
        data = %config.data_file.display(),
        topics = %config.topics_file.display(),
        "Initializing vote server"
    );

    let app_state = AppState::new(config);

    let (data, _) = app_state.store.load_data().await?;
    let topics = app_state.store.topics().await?;
    tracing::info!(
        "Loaded {} items across {} topic buckets, {} listed topics",
        data.item_count(),
        data.topic_names().count(),
        topics.topics.len()
    );

    Ok(create_router(app_state))
}
