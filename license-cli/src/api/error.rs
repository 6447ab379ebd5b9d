//! Error types for the Microsoft Graph license layer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `GraphError`.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur when talking to Microsoft Graph or persisting
/// catalog snapshots.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Configuration validation error (missing tenant/credentials etc.).
    #[error("Configuration error: {0}")]
    Config(String),

    /// OAuth2 authentication error. Always fatal for the whole operation.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Graph API error response (OData error body).
    #[error("Graph API error: {code} - {message}")]
    GraphApi { code: String, message: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// User lookup failed. Fatal when it is the copy source, recorded
    /// per-target otherwise.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// The tenant reported zero subscribed SKUs. Treated as an invariant
    /// violation, not a legitimate empty catalog.
    #[error("Tenant returned an empty SKU catalog")]
    EmptyCatalog,

    /// The prior snapshot file exists but could not be read or parsed.
    #[error("Failed to read snapshot {path}: {source}")]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The new snapshot could not be written.
    #[error("Failed to write snapshot {path}: {source}")]
    SnapshotWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl GraphError {
    /// Whether this error came back as a 404 / resource-not-found from Graph.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::UserNotFound(_) => true,
            Self::GraphApi { code, .. } => code == "Request_ResourceNotFound",
            _ => false,
        }
    }
}
