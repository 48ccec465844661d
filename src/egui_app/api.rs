/**
 * Vote Server API Client
 *
 * Thin async wrapper over the server's HTTP interface. Non-success
 * responses are turned into `ClientError::Server`, using the `error` field
 * of the JSON error body when one is present.
 */

use reqwest::{Client, Response};
use serde::Deserialize;

use crate::egui_app::config::Config;
use crate::egui_app::error::ClientError;
use crate::shared::{ChangeSet, StoreData, TopicRequest, TopicsList, STORE_VERSION_HEADER};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the vote server
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: Config,
}

impl ApiClient {
    pub fn new(config: Config) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `GET /data`
    pub async fn fetch_data(&self) -> Result<StoreData, ClientError> {
        let response = self.client.get(self.config.api_url("/data")).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// `GET /topics`
    pub async fn fetch_topics(&self) -> Result<TopicsList, ClientError> {
        let response = self.client.get(self.config.api_url("/topics")).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// `POST /publish`
    ///
    /// Returns the store version reported by the server, if any.
    pub async fn publish(&self, changes: &ChangeSet) -> Result<Option<u64>, ClientError> {
        let response = self
            .client
            .post(self.config.api_url("/publish"))
            .json(changes)
            .send()
            .await?;
        let response = check_status(response).await?;

        let version = response
            .headers()
            .get(STORE_VERSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let message = response.text().await?;
        tracing::debug!(?version, "Publish acknowledged: {}", message);
        Ok(version)
    }

    /// `POST /topics/add`
    pub async fn add_topic(&self, topic: &str) -> Result<TopicsList, ClientError> {
        let request = TopicRequest {
            topic: topic.to_string(),
        };
        let response = self
            .client
            .post(self.config.api_url("/topics/add"))
            .json(&request)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// `DELETE /topics/delete`
    pub async fn delete_topic(&self, topic: &str) -> Result<TopicsList, ClientError> {
        let request = TopicRequest {
            topic: topic.to_string(),
        };
        let response = self
            .client
            .delete(self.config.api_url("/topics/delete"))
            .json(&request)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) if text.is_empty() => status.to_string(),
        Err(_) => text,
    };
    Err(ClientError::server(status.as_u16(), message))
}
