//! Integration tests
//!
//! - `api` - the HTTP server, driven through its router
//! - `client` - the desktop client's sync layer against a mock server

pub mod api;
pub mod client;
