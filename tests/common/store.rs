//! Temporary on-disk store for server tests

use axum_test::TestServer;
use serde::Serialize;
use std::path::PathBuf;
use tempfile::TempDir;
use topicvote::backend::server::{create_app, ServerConfig};

/// A server configuration rooted in a fresh temp directory
pub struct TestStore {
    pub dir: TempDir,
    pub config: ServerConfig,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = ServerConfig {
            port: 0,
            data_file: dir.path().join("data.json"),
            topics_file: dir.path().join("topics.json"),
            public_dir: dir.path().to_path_buf(),
        };
        Self { dir, config }
    }

    pub fn with_documents<D: Serialize, T: Serialize>(data: &D, topics: &T) -> Self {
        let store = Self::new();
        store.write_json(store.config.data_file.clone(), data);
        store.write_json(store.config.topics_file.clone(), topics);
        store
    }

    fn write_json<V: Serialize>(&self, path: PathBuf, value: &V) {
        let text = serde_json::to_string_pretty(value).expect("Failed to encode fixture");
        std::fs::write(path, text).expect("Failed to write fixture");
    }

    pub fn data_bytes(&self) -> Vec<u8> {
        std::fs::read(&self.config.data_file).expect("data.json missing")
    }

    pub fn data_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.data_bytes()).expect("data.json is not JSON")
    }

    pub async fn server(&self) -> TestServer {
        let app = create_app(self.config.clone())
            .await
            .expect("Failed to create app");
        TestServer::new(app).expect("Failed to start test server")
    }
}
