/**
 * Server Synchronization
 *
 * Async operations against the vote server and the local session store,
 * plus `SyncWorker`, which runs them off the UI thread and reports results
 * back over a channel that the UI polls once per frame.
 */

use std::sync::mpsc::{channel, Receiver, Sender};

use tokio::runtime::Runtime;

use crate::egui_app::api::ApiClient;
use crate::egui_app::error::ClientError;
use crate::egui_app::local_store::{SessionSnapshot, SessionStore};
use crate::egui_app::state::client::ClientState;
use crate::shared::{ChangeSet, StoreData, TopicsList};

/// Result of a background operation, delivered to the UI thread
#[derive(Debug)]
pub enum SyncOutcome {
    Published(Result<StoreData, ClientError>),
    Reloaded(Result<(StoreData, TopicsList), ClientError>),
    TopicAdded(Result<TopicsList, ClientError>),
    TopicDeleted {
        topic: String,
        result: Result<TopicsList, ClientError>,
    },
}

/// Publish `changes`, then fetch the resulting store
///
/// The change set is only considered published once `POST /publish`
/// succeeded; a failed re-fetch is reported as a failure so the caller keeps
/// the changes. Resubmitting them is safe because the server skips event ids
/// it already applied.
pub async fn publish_changes(
    api: &ApiClient,
    changes: &ChangeSet,
) -> Result<StoreData, ClientError> {
    let version = api.publish(changes).await?;
    tracing::debug!(events = changes.len(), ?version, "Published change set");
    api.fetch_data().await
}

/// Fetch the store and the topics list
pub async fn fetch_all(api: &ApiClient) -> Result<(StoreData, TopicsList), ClientError> {
    let data = api.fetch_data().await?;
    let topics = api.fetch_topics().await?;
    Ok((data, topics))
}

/// Build the starting state: the saved session when there is one, otherwise
/// a fresh fetch from the server
pub async fn load_state(
    api: &ApiClient,
    store: Option<&SessionStore>,
) -> Result<ClientState, ClientError> {
    if let Some(store) = store {
        match store.load().await {
            Ok(Some(snapshot)) => {
                tracing::info!(
                    pending = snapshot.pending.len(),
                    retry = snapshot.retry.is_some(),
                    "Resumed saved session"
                );
                return Ok(ClientState::from_snapshot(snapshot));
            }
            Ok(None) => {}
            Err(err) => tracing::warn!("Could not read saved session: {}", err),
        }
    }

    let (data, topics) = fetch_all(api).await?;
    tracing::info!(items = data.item_count(), "Loaded data from server");
    Ok(ClientState::new(data, topics))
}

/// Runs server calls on a tokio runtime and hands results to the UI thread
pub struct SyncWorker {
    runtime: Runtime,
    api: ApiClient,
    store: Option<SessionStore>,
    tx: Sender<SyncOutcome>,
    rx: Receiver<SyncOutcome>,
}

impl SyncWorker {
    /// Create the worker and open the session database
    ///
    /// A session database that cannot be opened is logged and skipped; the
    /// client still works, it just cannot resume after a restart.
    pub fn new(api: ApiClient) -> Result<Self, ClientError> {
        let runtime = Runtime::new()
            .map_err(|e| ClientError::Storage(format!("Failed to create runtime: {}", e)))?;

        let path = api.config().session_db();
        let store = match runtime.block_on(SessionStore::open(&path)) {
            Ok(store) => Some(store),
            Err(err) => {
                tracing::warn!("Session persistence disabled: {}", err);
                None
            }
        };

        let (tx, rx) = channel();
        Ok(Self {
            runtime,
            api,
            store,
            tx,
            rx,
        })
    }

    /// Load the starting state, blocking the caller
    pub fn load_blocking(&self) -> Result<ClientState, ClientError> {
        self.runtime.block_on(load_state(&self.api, self.store.as_ref()))
    }

    /// Save the session, blocking the caller
    pub fn persist(&self, snapshot: &SessionSnapshot) -> Result<(), ClientError> {
        match &self.store {
            Some(store) => self.runtime.block_on(store.save(snapshot)),
            None => Ok(()),
        }
    }

    /// Publish, blocking the caller. Used on exit.
    pub fn publish_blocking(&self, changes: &ChangeSet) -> Result<StoreData, ClientError> {
        self.runtime.block_on(publish_changes(&self.api, changes))
    }

    pub fn spawn_publish(&self, changes: ChangeSet) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = publish_changes(&api, &changes).await;
            let _ = tx.send(SyncOutcome::Published(result));
        });
    }

    pub fn spawn_reload(&self) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = fetch_all(&api).await;
            let _ = tx.send(SyncOutcome::Reloaded(result));
        });
    }

    pub fn spawn_add_topic(&self, topic: String) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = api.add_topic(&topic).await;
            let _ = tx.send(SyncOutcome::TopicAdded(result));
        });
    }

    pub fn spawn_delete_topic(&self, topic: String) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = api.delete_topic(&topic).await;
            let _ = tx.send(SyncOutcome::TopicDeleted { topic, result });
        });
    }

    /// Next finished operation, if any
    pub fn poll(&self) -> Option<SyncOutcome> {
        self.rx.try_recv().ok()
    }
}
