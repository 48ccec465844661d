/**
 * Vote Data Handlers
 *
 * - `GET /data` (alias `GET /votes`) - the full voting document
 * - `POST /publish` - apply a client change set
 * - `POST /save-data` - legacy bulk overwrite of whole topics
 *
 * `GET /data` and `POST /publish` report the store version in the
 * `X-Store-Version` header.
 */

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::backend::error::BackendError;
use crate::backend::storage::JsonStore;
use crate::shared::{ChangeSet, StoreData, TopicItems, STORE_VERSION_HEADER};

/// Body of the legacy `POST /save-data` endpoint
#[derive(Debug, Deserialize)]
pub struct SaveDataRequest {
    /// Topics to overwrite wholesale
    pub changes: Option<BTreeMap<String, TopicItems>>,
    /// Topics to remove
    #[serde(default)]
    pub deletions: Option<Vec<String>>,
}

/// Response of the legacy `POST /save-data` endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveDataResponse {
    pub message: String,
    pub data: StoreData,
}

fn version_header(version: u64) -> [(HeaderName, HeaderValue); 1] {
    [(
        HeaderName::from_static(STORE_VERSION_HEADER),
        HeaderValue::from(version),
    )]
}

/// Serve the full voting document
pub async fn get_data(State(store): State<Arc<JsonStore>>) -> Result<Response, BackendError> {
    let (data, version) = store.load_data().await?;
    tracing::debug!(items = data.item_count(), version, "Data served");
    Ok((version_header(version), Json(data)).into_response())
}

/// Apply a published change set
///
/// The body is parsed by hand so that malformed payloads produce the same
/// JSON error body as every other 400.
pub async fn publish(
    State(store): State<Arc<JsonStore>>,
    body: Bytes,
) -> Result<Response, BackendError> {
    let changes: ChangeSet = if body.iter().all(u8::is_ascii_whitespace) {
        ChangeSet::new()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            BackendError::bad_request(format!("Invalid change set: {}", e))
        })?
    };

    if changes.is_empty() {
        let version = store.version().await;
        return Ok((StatusCode::OK, version_header(version), "No changes to apply.").into_response());
    }

    let outcome = store.publish(&changes).await?;
    Ok((
        StatusCode::OK,
        version_header(outcome.version),
        "Data successfully published.",
    )
        .into_response())
}

/// Legacy bulk overwrite
pub async fn save_data(
    State(store): State<Arc<JsonStore>>,
    body: Bytes,
) -> Result<Json<SaveDataResponse>, BackendError> {
    let request: SaveDataRequest = serde_json::from_slice(&body)
        .map_err(|e| BackendError::bad_request(format!("Invalid request body: {}", e)))?;

    let Some(changes) = request.changes else {
        return Err(BackendError::bad_request("No changes provided"));
    };
    let deletions = request.deletions.unwrap_or_default();

    let data = store.save_legacy(changes, &deletions).await?;
    Ok(Json(SaveDataResponse {
        message: "Data saved successfully".to_string(),
        data,
    }))
}
