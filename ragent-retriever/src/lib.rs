//! ragent-retriever: in-memory exact nearest-neighbour document retrieval
//!
//! A small corpus of documents is embedded once, stored in a vector index, and
//! queried with natural-language questions. Results are the closest documents
//! by squared Euclidean distance between embeddings.
//!
//! ## Key Modules
//!
//! - **[`retrieval`]**: the [`RetrievalEngine`] that ties everything together
//! - **[`storage`]**: document storage and the [`storage::VectorIndex`] contract
//! - **[`error`]**: the [`RetrievalError`] taxonomy
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ragent_embed::{EmbedConfig, EmbeddingProvider, FastEmbedProvider};
//! use ragent_retriever::RetrievalEngine;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider: Arc<dyn EmbeddingProvider> =
//!     Arc::new(FastEmbedProvider::create(EmbedConfig::default()).await?);
//!
//! let engine = RetrievalEngine::build(
//!     vec!["The capital of France is Paris.".to_string()],
//!     provider,
//! ).await?;
//! let best = engine.query("What is the main city in France?", 1).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! corpus ──→ EmbeddingProvider ──→ VectorIndex::build
//!                                       ↓
//! question ──→ EmbeddingProvider ──→ VectorIndex::search ──→ DocumentStore ──→ results
//! ```

pub mod error;
pub mod retrieval;
pub mod storage;

pub use error::{Result, RetrievalError};
pub use retrieval::{EngineConfig, RetrievalEngine, ScoredDocument};
