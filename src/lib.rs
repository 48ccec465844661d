//! Topic Vote - Main Library
//!
//! A small voting application: items grouped into topics, voted up or down,
//! added, deleted and moved between topics. The server keeps the data in a
//! JSON file; the desktop client buffers edits locally and publishes them
//! explicitly.
//!
//! # Module Structure
//!
//! - **`shared`** - Types and logic used by both sides
//!   - The vote document and topics list
//!   - The change set and the replay algorithm that applies it
//!   - Error and configuration types
//!
//! - **`backend`** - Server-side code (only compiled with the `ssr` feature)
//!   - Axum HTTP server
//!   - JSON file store with serialized writes
//!
//! - **`egui_app`** - Native desktop client (egui/eframe)
//!   - Local cache and change tracking
//!   - SQLite session persistence
//!   - Background publishing
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the backend module and the `vote-server` binary
//!   (on by default)
//!
//! # Usage
//!
//! ```rust,no_run
//! use topicvote::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::from_env()).await?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// egui native desktop app
/// Only compiled for native targets (not WASM)
#[cfg(not(target_arch = "wasm32"))]
pub mod egui_app;
