//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the client and the server. These types are used for serialization over
//! the JSON HTTP API and for the replay algorithm both sides run.
//!
//! # Overview
//!
//! - **`store`** - The voting document (topics, items, counters) and topics list
//! - **`change_set`** - Buffered client edits sent to `POST /publish`
//! - **`replay`** - Applies a change set to a document
//! - **`config`** - Client configuration

/// Store document types
pub mod store;

/// Change set of buffered edits
pub mod change_set;

/// Change set replay algorithm
pub mod replay;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use store::{
    normalize_item_text, normalize_topic, Item, StoreData, TopicItems, TopicRequest, TopicsList,
    STORE_VERSION_HEADER,
};
pub use change_set::{ChangeSet, Deletion, NewItem, TopicChange, VoteChange, VoteType};
pub use replay::{replay, replay_once, AppliedEvents, ReplayReport};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
