//! Error types for ESI operations
//!
//! Failures are classified by what a caller can do about them. Authorization
//! and client errors are returned after a single attempt, transient failures
//! are absorbed by the executor's retry loop and only surface as
//! [`EsiError::RetriesExhausted`] once the attempt budget is spent.

use thiserror::Error;

/// Errors returned by [`crate::EsiClient`] and its resource accessors
#[derive(Debug, Error)]
pub enum EsiError {
    /// The token was rejected or lacks the scope for this endpoint (401/403)
    #[error("Unauthorized ({status}) requesting {url}")]
    Unauthorized {
        /// HTTP status code
        status: u16,
        /// Full request URL
        url: String,
    },

    /// The request itself is wrong or names a missing resource (400/404)
    #[error("Client error ({status}) requesting {url}: {body}")]
    Client {
        /// HTTP status code
        status: u16,
        /// Full request URL
        url: String,
        /// Response body returned by ESI
        body: String,
    },

    /// Every attempt failed with a transient error
    #[error("ESI request to {url} failed {attempts} times, gave up: {diagnostic}")]
    RetriesExhausted {
        /// Full request URL
        url: String,
        /// Number of attempts made
        attempts: u32,
        /// Status of the last HTTP response, if any response was received
        last_status: Option<u16>,
        /// Last response body or transport error message
        diagnostic: String,
    },

    /// The response body does not match the expected shape
    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        /// Request path
        path: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// A batch lookup returned a different number of records than requested
    #[error("Requested {requested} records but ESI returned {returned}")]
    CountMismatch {
        /// Number of identifiers submitted
        requested: usize,
        /// Number of records returned
        returned: usize,
    },

    /// A batch lookup returned records that do not cover every submitted id
    #[error("ESI returned no record for {} of the submitted ids: {missing:?}", .missing.len())]
    UnresolvedIds {
        /// Submitted ids without a matching record, in submission order
        missing: Vec<u64>,
    },

    /// The response was valid but did not contain the requested entity
    #[error("Not found: {0}")]
    NotFound(String),

    /// The `X-Pages` header was present but not a page count
    #[error("Invalid X-Pages header: {0:?}")]
    InvalidPageHeader(String),

    /// The default transport could not be built
    #[error("Transport setup failed: {0}")]
    Transport(String),
}

impl EsiError {
    /// HTTP status associated with this error, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            EsiError::Unauthorized { status, .. } | EsiError::Client { status, .. } => Some(*status),
            EsiError::RetriesExhausted { last_status, .. } => *last_status,
            _ => None,
        }
    }

    /// Check if this error was produced by an HTTP status rather than local decoding
    pub fn is_http_error(&self) -> bool {
        self.status().is_some()
    }
}

/// Result type for ESI operations
pub type Result<T> = std::result::Result<T, EsiError>;
