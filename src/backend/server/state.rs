/**
 * Application State Management
 *
 * The `AppState` struct is the central state container shared by all
 * handlers. It implements `FromRef` so handlers can extract just the part
 * they need.
 *
 * # Example
 *
 * ```rust,no_run
 * use std::sync::Arc;
 * use axum::extract::State;
 * use topicvote::backend::storage::JsonStore;
 *
 * async fn handler(State(store): State<Arc<JsonStore>>) {
 *     let topics = store.topics().await;
 * }
 * ```
 */

use axum::extract::FromRef;
use std::sync::Arc;
use crate::backend::server::config::ServerConfig;
use crate::backend::storage::JsonStore;

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    /// The persisted voting store
    pub store: Arc<JsonStore>,
    /// Configuration the server was started with
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let store = JsonStore::new(config.data_file.clone(), config.topics_file.clone());
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for Arc<JsonStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
