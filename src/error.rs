//! Unified error types for the query pipeline.

use thiserror::Error;

/// Top-level error for pipeline and data-loading operations.
///
/// An exhausted extraction loop is not an error: it yields the
/// `"No clear answer found."` fallback with a successful payload.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Empty or whitespace-only query; surfaced to callers as a 400.
    #[error("Please enter a question.")]
    EmptyQuery,

    /// Corpus or reference file missing/malformed.
    #[error("failed to load {path}: {reason}")]
    DataLoad { path: String, reason: String },

    /// Embedding or span-extraction oracle failure.
    #[error("oracle invocation failed: {0}")]
    Oracle(String),

    /// Filesystem errors while reading or persisting data files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    /// Build a `DataLoad` error from a path-ish value and cause.
    pub fn data_load(path: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        Self::DataLoad {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}
