/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Vote data
 * - `GET /data` - Full voting document (also served as `GET /votes`)
 * - `POST /publish` - Apply a buffered change set
 * - `POST /save-data` - Legacy bulk overwrite of whole topics
 *
 * ## Topics
 * - `GET /topics` - Ordered topics list
 * - `POST /topics/add` - Add a topic
 * - `DELETE /topics/delete` - Delete an empty topic
 */

use axum::{
    routing::{delete, get, post},
    Router,
};
use crate::backend::server::state::AppState;
use crate::backend::topics::{add_topic, delete_topic, get_topics};
use crate::backend::votes::{get_data, publish, save_data};

/// Add the vote data routes to the router
pub fn configure_vote_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/data", get(get_data))
        .route("/votes", get(get_data))
        .route("/publish", post(publish))
        .route("/save-data", post(save_data))
}

/// Add the topic routes to the router
///
/// Topic changes bypass the change set and take effect immediately.
pub fn configure_topic_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/topics", get(get_topics))
        .route("/topics/add", post(add_topic))
        .route("/topics/delete", delete(delete_topic))
}
