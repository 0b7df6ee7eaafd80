//! Error types for the seo-optimizer crate.

/// Optimizer-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum OptimizerError {
    /// Request rejected before any fetch: empty text fields or a
    /// non-positive item id.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Content item does not exist in the store.
    #[error("item not found: {id}")]
    ItemNotFound { id: u64 },

    /// A replacement request matched no block after a full traversal.
    /// Nothing was persisted.
    #[error("original text not found in any block of item {id}")]
    NoBlockMatched { id: u64 },

    /// The AI backend returned an error or a malformed response.
    /// Per-span: does not abort the rest of a batch.
    #[error("generation failed: {0}")]
    Generation(String),

    /// The generation backend is not configured (missing provider or key).
    #[error("AI backend not configured: provider and API key are required")]
    BackendNotConfigured,

    /// The store rejected a write after a successful traversal.
    #[error("failed to persist item {id}: {reason}")]
    Persist { id: u64, reason: String },

    /// Unknown metadata recommendation type in an apply request.
    #[error("unknown recommendation type: {0}")]
    UnknownMetaType(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error with context.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP transport error talking to the generation backend.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Convenience result type for seo-optimizer operations.
pub type OptimizerResult<T> = Result<T, OptimizerError>;
