//! Storage layer for the retrieval engine
//!
//! Documents and their vectors live in two separate structures linked only by
//! [`DocumentId`]. The [`DocumentStore`] owns the text, a [`VectorIndex`]
//! owns the vectors, so an index can be rebuilt or swapped for a different
//! implementation without touching document storage.
//!
//! ## Key Components
//!
//! - **DocumentStore**: ordered, immutable corpus addressable by id
//! - **VectorIndex**: build + exact k-nearest-neighbour search contract
//! - **FlatIndex**: brute-force linear-scan implementation of `VectorIndex`
//!
//! ## Architecture
//!
//! ```text
//! texts ──→ DocumentStore (id → text)
//!   │
//!   └─→ EmbeddingProvider ──→ VectorIndex (id → vector) ──→ Neighbor(id, distance)
//! ```

use serde::Serialize;

pub mod document_store;
pub mod flat_index;

pub use document_store::DocumentStore;
pub use flat_index::{FlatIndex, squared_euclidean};

use crate::error::Result;

/// Position of a document in its corpus, assigned at construction (0-based).
pub type DocumentId = usize;

/// A corpus entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub id: DocumentId,
    pub text: String,
}

/// One search hit: a document id and its squared Euclidean distance to the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor {
    pub id: DocumentId,
    pub distance: f32,
}

/// Exact or approximate nearest-neighbour index over a fixed set of vectors.
///
/// The vector at position `i` of the build input is indexed under id `i`.
/// Implementations are immutable once built; replacing the contents means
/// building a new index.
pub trait VectorIndex: Send + Sync + Sized {
    /// Build an index from a non-empty sequence of equal-length vectors.
    ///
    /// Fails with `EmptyIndex` on zero vectors and `DimensionMismatch` when
    /// any vector's length differs from the first one's.
    fn build(vectors: Vec<Vec<f32>>) -> Result<Self>;

    /// Up to `k` nearest entries, ascending by distance, ties by ascending id.
    ///
    /// `k` larger than [`VectorIndex::len`] is clamped. Fails with `InvalidK`
    /// when `k == 0` and `DimensionMismatch` when the query has the wrong length.
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>>;

    /// Number of indexed vectors (always at least 1)
    fn len(&self) -> usize;

    /// Length shared by every indexed vector
    fn dimension(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
