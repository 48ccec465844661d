/**
 * Topic Handlers
 *
 * Topic changes are applied synchronously, not buffered in a change set.
 *
 * - `GET /topics` - the ordered topics list
 * - `POST /topics/add` - append a topic (400 if it already exists)
 * - `DELETE /topics/delete` - remove an empty topic (400 if unknown or non-empty)
 */

use std::sync::Arc;

use axum::{body::Bytes, extract::State, response::Json};

use crate::backend::error::BackendError;
use crate::backend::storage::JsonStore;
use crate::shared::{TopicRequest, TopicsList};

fn parse_topic_request(body: &[u8]) -> Result<TopicRequest, BackendError> {
    serde_json::from_slice(body)
        .map_err(|e| BackendError::bad_request(format!("Invalid topic request: {}", e)))
}

pub async fn get_topics(
    State(store): State<Arc<JsonStore>>,
) -> Result<Json<TopicsList>, BackendError> {
    Ok(Json(store.topics().await?))
}

pub async fn add_topic(
    State(store): State<Arc<JsonStore>>,
    body: Bytes,
) -> Result<Json<TopicsList>, BackendError> {
    let request = parse_topic_request(&body)?;
    Ok(Json(store.add_topic(&request.topic).await?))
}

pub async fn delete_topic(
    State(store): State<Arc<JsonStore>>,
    body: Bytes,
) -> Result<Json<TopicsList>, BackendError> {
    let request = parse_topic_request(&body)?;
    Ok(Json(store.delete_topic(&request.topic).await?))
}
