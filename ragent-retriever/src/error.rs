//! Error taxonomy for index construction and retrieval

use crate::storage::DocumentId;
use ragent_embed::EmbedError;

/// Result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Every way building or querying a retrieval engine can fail.
///
/// Nothing here is retried or swallowed by the crate. Only
/// [`RetrievalError::ProviderUnavailable`] is worth retrying; the rest are
/// caller or data errors that need different input.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    /// An engine was requested over zero documents
    #[error("Cannot build a retrieval engine over an empty corpus")]
    EmptyCorpus,

    /// An index was requested over zero vectors
    #[error("Cannot build an index from zero vectors")]
    EmptyIndex,

    /// The question was empty or whitespace only
    #[error("Question must not be empty")]
    EmptyQuestion,

    /// A vector's length differs from the index dimensionality
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// `k` was zero, or exceeded the corpus size in strict mode
    #[error("Invalid k: {k}")]
    InvalidK { k: usize },

    /// No document carries this identifier
    #[error("Document {id} not found")]
    NotFound { id: DocumentId },

    /// The embedding provider failed; the underlying error is preserved
    #[error("Embedding provider failed: {source}")]
    ProviderUnavailable {
        #[from]
        source: EmbedError,
    },
}

impl RetrievalError {
    /// Whether retrying the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ProviderUnavailable { source } if source.is_unavailable())
    }
}
