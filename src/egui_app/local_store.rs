//! # Local Session Store
//!
//! SQLite persistence for the client session so a restart resumes where the
//! user left off, unpublished edits included. The schema is a single
//! key/value table; each value is a JSON document.
//!
//! | key              | value                         |
//! |------------------|-------------------------------|
//! | `cache`          | last known `StoreData`        |
//! | `topics`         | `TopicsList`                  |
//! | `pending`        | unpublished `ChangeSet`       |
//! | `retry`          | failed `ChangeSet` (optional) |
//! | `last_published` | RFC 3339 timestamp (optional) |

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::egui_app::error::ClientError;
use crate::shared::{ChangeSet, StoreData, TopicsList};

const KEY_CACHE: &str = "cache";
const KEY_TOPICS: &str = "topics";
const KEY_PENDING: &str = "pending";
const KEY_RETRY: &str = "retry";
const KEY_LAST_PUBLISHED: &str = "last_published";

/// Everything the client persists between runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub cache: StoreData,
    pub topics: TopicsList,
    pub pending: ChangeSet,
    /// A set that was in flight or failed; published before `pending`
    pub retry: Option<ChangeSet>,
    pub last_published: Option<DateTime<Utc>>,
}

/// SQLite-backed session store
#[derive(Debug, Clone)]
pub struct SessionStore {
    pool: SqlitePool,
}

impl SessionStore {
    /// Open or create the session database at `path`
    pub async fn open(path: &Path) -> Result<Self, ClientError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::Storage(format!("{}: {}", parent.display(), e)))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        tracing::debug!("Session database opened at {}", path.display());
        Self::with_pool(pool).await
    }

    /// Open a private in-memory database
    pub async fn in_memory() -> Result<Self, ClientError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        // One connection, otherwise each pooled connection sees its own database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, ClientError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS session (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }

    /// Load the saved session, or `None` if nothing was saved yet
    pub async fn load(&self) -> Result<Option<SessionSnapshot>, ClientError> {
        let Some(cache) = self.get::<StoreData>(KEY_CACHE).await? else {
            return Ok(None);
        };

        Ok(Some(SessionSnapshot {
            cache,
            topics: self.get(KEY_TOPICS).await?.unwrap_or_default(),
            pending: self.get(KEY_PENDING).await?.unwrap_or_default(),
            retry: self.get(KEY_RETRY).await?,
            last_published: self.get(KEY_LAST_PUBLISHED).await?,
        }))
    }

    /// Replace the saved session in one transaction
    pub async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), ClientError> {
        let mut tx = self.pool.begin().await?;
        for (key, value) in [
            (KEY_CACHE, serde_json::to_string(&snapshot.cache)?),
            (KEY_TOPICS, serde_json::to_string(&snapshot.topics)?),
            (KEY_PENDING, serde_json::to_string(&snapshot.pending)?),
            (KEY_RETRY, serde_json::to_string(&snapshot.retry)?),
            (KEY_LAST_PUBLISHED, serde_json::to_string(&snapshot.last_published)?),
        ] {
            sqlx::query(
                "INSERT INTO session (key, value) VALUES (?, ?)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::debug!(
            pending = snapshot.pending.len(),
            retry = snapshot.retry.as_ref().map_or(0, ChangeSet::len),
            "Session saved"
        );
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ClientError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM session WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some((value,)) => Ok(serde_json::from_str::<Option<T>>(&value)?),
            None => Ok(None),
        }
    }
}
