//! Backend Module
//!
//! Server-side code for the vote server: an Axum HTTP server that owns the
//! voting document (`data.json`) and the topics list (`topics.json`).
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`votes`** - Data, publish and legacy save handlers
//! - **`topics`** - Topic list handlers
//! - **`storage`** - File-backed JSON store with serialized read-modify-write
//! - **`error`** - Backend-specific error types
//!
//! ```text
//! backend/
//! ├── mod.rs
//! ├── main.rs         - Server binary
//! ├── server/         - Initialization and state
//! ├── routes/         - Route configuration
//! ├── votes/          - Vote data handlers
//! ├── topics/         - Topic handlers
//! ├── storage.rs      - JSON file store
//! └── error/          - Error types
//! ```
//!
//! # Concurrency
//!
//! Every mutation of a store file happens under that file's async mutex, and
//! files are replaced by writing a sibling temp file and renaming it over the
//! original. Concurrent publishes therefore never lose each other's votes.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Vote data handlers
pub mod votes;

/// Topic handlers
pub mod topics;

/// JSON file store
pub mod storage;

/// Backend error types
pub mod error;

pub use server::create_app;
pub use storage::{JsonStore, StorageError};
pub use error::BackendError;
