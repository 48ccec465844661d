//! Common test utilities and helpers
//!
//! - Temporary store directories for the server
//! - Change set builders

#[cfg(feature = "ssr")]
pub mod store;


#[cfg(feature = "ssr")]
pub use store::*;
pub use fixtures::*;
