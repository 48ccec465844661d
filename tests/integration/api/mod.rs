//! API integration tests
//!
//! Integration tests for all API endpoints

#[cfg(feature = "ssr")]
mod topics_test;
