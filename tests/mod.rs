//! Test suite for topicvote
//!
//! This module organizes all tests

pub mod common;
pub mod integration;
pub mod property;
