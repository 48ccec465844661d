/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Handler errors occur when processing HTTP requests:
 * - Unparseable request bodies
 * - Missing required fields (legacy `changes`)
 *
 * ## Storage Errors
 *
 * Storage errors come from the JSON store files:
 * - I/O failures reading or writing `data.json` / `topics.json` (500)
 * - Corrupt store documents (500)
 * - Topic rule violations: duplicate, unknown or non-empty topics (400)
 *
 * Stale references inside a published change set are not errors; the replay
 * skips them silently.
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::backend::storage::StorageError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use topicvote::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "No changes provided");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., invalid request body)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Error raised by the JSON store
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Shorthand for a 400 handler error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `Storage` - 400 for topic rule violations, 500 for I/O and corrupt files
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Storage(err) => match err {
                StorageError::TopicExists(_)
                | StorageError::TopicNotFound(_)
                | StorageError::TopicNotEmpty(_)
                | StorageError::InvalidTopic => StatusCode::BAD_REQUEST,
                StorageError::Io { .. } | StorageError::Corrupt { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Storage(err) => err.to_string(),
        }
    }
}
