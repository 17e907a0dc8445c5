//! # Document Store Error Types
//!
//! Error types for hosted document-store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  HTTP error (reqwest::Error) / API status code                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BaasError (this module) ← Adds context and categorization             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ToolError / storefront API error ← Serialized for the caller          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  User-friendly message                                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Document store operation errors.
///
/// These wrap transport and API errors from the hosted backend and provide
/// categorization for retry/display decisions.
#[derive(Debug, Error)]
pub enum BaasError {
    /// Document not found in the collection.
    #[error("{collection} document not found: {id}")]
    NotFound { collection: String, id: String },

    /// A document with this id already exists.
    #[error("Duplicate document in {collection}: '{id}' already exists")]
    Conflict { collection: String, id: String },

    /// The API key or project id was rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The hosted API throttled the request.
    #[error("Rate limited by document store")]
    RateLimited,

    /// Transport-level failure (DNS, TLS, connection reset).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The API answered with an unexpected status.
    #[error("Document store returned {status}: {message}")]
    Api { status: u16, message: String },

    /// A document did not match the expected shape.
    #[error("Malformed document in {collection}: {reason}")]
    Malformed { collection: String, reason: String },

    /// Internal store error.
    #[error("Internal document store error: {0}")]
    Internal(String),
}

impl BaasError {
    /// Creates a NotFound error for a given collection and document id.
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        BaasError::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Creates a Conflict error.
    pub fn conflict(collection: impl Into<String>, id: impl Into<String>) -> Self {
        BaasError::Conflict {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Creates a Malformed error for a document that failed to (de)serialize.
    pub fn malformed(collection: impl Into<String>, reason: impl ToString) -> Self {
        BaasError::Malformed {
            collection: collection.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convert reqwest transport errors to BaasError.
///
/// Status-code mapping happens in the client where the collection/id
/// context is known; this only covers failures before a response exists.
impl From<reqwest::Error> for BaasError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BaasError::Transport(format!("timeout: {err}"))
        } else {
            BaasError::Transport(err.to_string())
        }
    }
}

/// Result type for document store operations.
pub type BaasResult<T> = Result<T, BaasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BaasError::not_found("orders", "abc-123");
        assert_eq!(err.to_string(), "orders document not found: abc-123");

        let err = BaasError::Api {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "Document store returned 503: maintenance");
    }
}
