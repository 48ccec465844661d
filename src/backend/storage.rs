/**
 * JSON File Store
 *
 * The persisted store is two JSON documents on disk:
 *
 * - `data.json`: topic -> item text -> `{upvotes, downvotes}`
 * - `topics.json`: `{"topics": [...]}`
 *
 * Each document is read and written wholesale. Every read-modify-write cycle
 * runs while holding that document's mutex, and writes go to a temporary file
 * that is renamed over the original, so concurrent publishes cannot lose each
 * other's updates and readers never see a half-written file.
 *
 * Lock order is data before topics.
 */

use crate::shared::{
    normalize_topic, replay_once, AppliedEvents, ChangeSet, ReplayReport, StoreData, TopicItems,
    TopicsList,
};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors raised by the JSON store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Topic already exists: {0}")]
    TopicExists(String),

    #[error("Topic not found: {0}")]
    TopicNotFound(String),

    #[error("Topic still has items: {0}")]
    TopicNotEmpty(String),

    #[error("Topic name must not be empty")]
    InvalidTopic,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Result of a publish against the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishOutcome {
    pub report: ReplayReport,
    /// Store version after the publish
    pub version: u64,
}

/// Mutable bookkeeping guarded by the data lock
#[derive(Debug, Default)]
struct DataState {
    version: u64,
    applied: AppliedEvents,
}

/// File-backed voting store
#[derive(Debug)]
pub struct JsonStore {
    data_path: PathBuf,
    topics_path: PathBuf,
    data: Mutex<DataState>,
    topics: Mutex<()>,
}

impl JsonStore {
    pub fn new(data_path: impl Into<PathBuf>, topics_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            topics_path: topics_path.into(),
            data: Mutex::new(DataState::default()),
            topics: Mutex::new(()),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn topics_path(&self) -> &Path {
        &self.topics_path
    }

    /// Read the whole voting document with its current version
    pub async fn load_data(&self) -> Result<(StoreData, u64)> {
        let state = self.data.lock().await;
        let data = read_document(&self.data_path).await?;
        Ok((data, state.version))
    }

    /// Current store version
    pub async fn version(&self) -> u64 {
        self.data.lock().await.version
    }

    /// Apply a change set to the voting document
    ///
    /// An empty change set returns immediately without touching the file.
    /// The file is only rewritten when the replay changed something.
    pub async fn publish(&self, changes: &ChangeSet) -> Result<PublishOutcome> {
        let mut state = self.data.lock().await;
        if changes.is_empty() {
            return Ok(PublishOutcome {
                report: ReplayReport::default(),
                version: state.version,
            });
        }

        let mut data: StoreData = read_document(&self.data_path).await?;
        let mut applied = state.applied.clone();
        let report = replay_once(&mut data, changes, &mut applied);

        if report.changed() {
            write_document(&self.data_path, &data).await?;
            state.version += 1;
        }
        // Only remember event ids once the write has landed
        state.applied = applied;

        tracing::info!(
            votes = report.votes_applied,
            moves = report.moves_applied,
            deletions = report.deletions_applied,
            created = report.items_created,
            stale = report.stale_skipped,
            duplicates = report.duplicates_skipped,
            version = state.version,
            "Applied change set"
        );

        Ok(PublishOutcome {
            report,
            version: state.version,
        })
    }

    /// Legacy bulk save: overwrite top-level topics, then drop deleted ones
    pub async fn save_legacy(
        &self,
        changes: BTreeMap<String, TopicItems>,
        deletions: &[String],
    ) -> Result<StoreData> {
        let mut state = self.data.lock().await;
        let mut data: StoreData = read_document(&self.data_path).await?;

        for (topic, items) in changes {
            data.set_topic(&topic, items);
        }
        for topic in deletions {
            data.remove_topic(topic);
        }

        write_document(&self.data_path, &data).await?;
        state.version += 1;
        Ok(data)
    }

    /// Read the topics list
    pub async fn topics(&self) -> Result<TopicsList> {
        let _guard = self.topics.lock().await;
        read_document(&self.topics_path).await
    }

    /// Append a topic; duplicates are rejected
    pub async fn add_topic(&self, topic: &str) -> Result<TopicsList> {
        let topic = normalize_topic(topic);
        if topic.is_empty() {
            return Err(StorageError::InvalidTopic);
        }

        let _guard = self.topics.lock().await;
        let mut topics: TopicsList = read_document(&self.topics_path).await?;
        if !topics.add(&topic) {
            return Err(StorageError::TopicExists(topic));
        }
        write_document(&self.topics_path, &topics).await?;
        tracing::info!(%topic, "Topic added");
        Ok(topics)
    }

    /// Remove a topic that holds no items
    ///
    /// Emptiness is checked against the stored document, not trusted from the
    /// caller. The empty bucket is dropped from the voting document too.
    pub async fn delete_topic(&self, topic: &str) -> Result<TopicsList> {
        let topic = normalize_topic(topic);

        let mut state = self.data.lock().await;
        let _guard = self.topics.lock().await;

        let mut topics: TopicsList = read_document(&self.topics_path).await?;
        if !topics.contains(&topic) {
            return Err(StorageError::TopicNotFound(topic));
        }

        let mut data: StoreData = read_document(&self.data_path).await?;
        if !data.is_topic_empty(&topic) {
            return Err(StorageError::TopicNotEmpty(topic));
        }

        if data.remove_topic(&topic).is_some() {
            write_document(&self.data_path, &data).await?;
            state.version += 1;
        }
        topics.remove(&topic);
        write_document(&self.topics_path, &topics).await?;
        tracing::info!(%topic, "Topic deleted");
        Ok(topics)
    }
}

/// Read a JSON document; a missing or blank file is the default document
async fn read_document<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-print `value` to a sibling temp file and rename it over `path`
async fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let io_err = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };

    let json = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, &json).await.map_err(io_err)?;
    tokio::fs::rename(&tmp, path).await.map_err(io_err)?;
    Ok(())
}
