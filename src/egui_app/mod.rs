//! egui Native Desktop App Module
//!
//! The voting client: an egui/eframe desktop application that keeps a local
//! cache of the server's vote data, buffers edits in a change set, and
//! publishes them on request or when the window closes.
//!
//! # Architecture
//!
//! - **`config`** - Server URL and session database location
//! - **`api`** - Async HTTP client for the vote server
//! - **`commands`** - Typed user commands
//! - **`state`** - Cache and change tracking (`ClientState`) and UI state (`AppState`)
//! - **`sync`** - Background publish/reload and session loading
//! - **`local_store`** - SQLite session persistence
//! - **`views`** - egui rendering
//! - **`theme`** - Colors and frames
//! - **`error`** - Client error type
//!
//! ```text
//! egui_app/
//! ├── mod.rs
//! ├── main.rs         - Application entry point
//! ├── config.rs
//! ├── api.rs
//! ├── commands.rs
//! ├── error.rs
//! ├── local_store.rs
//! ├── sync.rs
//! ├── state/          - ClientState and AppState
//! ├── views/          - Rendering
//! └── theme/          - Colors and frames
//! ```

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod local_store;
pub mod state;
pub mod sync;
pub mod theme;
pub mod views;

// Re-export commonly used types
pub use api::ApiClient;
pub use commands::Command;
pub use config::Config;
pub use error::ClientError;
pub use local_store::{SessionSnapshot, SessionStore};
pub use state::{AppState, ClientState};
pub use sync::{SyncOutcome, SyncWorker};
