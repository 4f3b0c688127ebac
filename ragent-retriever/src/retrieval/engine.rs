//! Retrieval engine: embeds a corpus once, then answers nearest-document queries.
//!
//! ## Lifecycle
//!
//! An engine only exists in the ready state. [`RetrievalEngine::build`] embeds
//! the whole corpus in a single provider call and builds the index; if either
//! step fails no engine value is produced. After that the corpus, the vectors
//! and the configuration are immutable and shared through `Arc`, so clones are
//! cheap and any number of tasks can query one engine concurrently.
//!
//! ## Example
//!
//! ```rust
//! use ragent_embed::{EmbeddingProvider, HashingProvider};
//! use ragent_retriever::retrieval::engine::RetrievalEngine;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider: Arc<dyn EmbeddingProvider> = Arc::new(HashingProvider::with_dimension(256)?);
//! let corpus = vec![
//!     "The capital of France is Paris.".to_string(),
//!     "The Sun is a star.".to_string(),
//! ];
//!
//! let engine = RetrievalEngine::build(corpus, provider).await?;
//! let results = engine.query("Which star is closest?", 1).await?;
//! println!("{} (distance {})", results[0].document.text, results[0].distance);
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, RetrievalError};
use crate::storage::{Document, DocumentStore, FlatIndex, VectorIndex};
use ragent_embed::{EmbedError, EmbeddingProvider};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for a retrieval engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineConfig {
    /// Number of results returned by [`RetrievalEngine::query_default`]
    pub default_k: usize,
    /// Reject `k` larger than the corpus instead of clamping it
    pub strict_k: bool,
}

impl EngineConfig {
    /// Create a configuration with defaults: one result per query, oversized
    /// `k` clamped to the corpus size.
    pub fn new() -> Self {
        Self {
            default_k: 1,
            strict_k: false,
        }
    }

    /// Set the number of results used by `query_default`.
    pub fn with_default_k(mut self, default_k: usize) -> Self {
        self.default_k = default_k;
        self
    }

    /// Enable or disable strict `k` validation.
    ///
    /// In strict mode a query asking for more results than there are documents
    /// fails with `InvalidK`; otherwise `k` is silently clamped.
    pub fn with_strict_k(mut self, strict_k: bool) -> Self {
        self.strict_k = strict_k;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A retrieved document and its squared Euclidean distance to the question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDocument {
    pub document: Document,
    pub distance: f32,
}

/// Summary of a built engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub documents: usize,
    pub dimension: usize,
    pub provider: String,
}

/// Exact nearest-neighbour document retrieval over an immutable corpus.
///
/// The index type is a parameter so any [`VectorIndex`] can replace the
/// default brute-force [`FlatIndex`] without touching the rest of the engine.
pub struct RetrievalEngine<I: VectorIndex = FlatIndex> {
    documents: Arc<DocumentStore>,
    index: Arc<I>,
    provider: Arc<dyn EmbeddingProvider>,
    config: EngineConfig,
}

impl<I: VectorIndex> Clone for RetrievalEngine<I> {
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
            index: Arc::clone(&self.index),
            provider: Arc::clone(&self.provider),
            config: self.config.clone(),
        }
    }
}

impl<I: VectorIndex> std::fmt::Debug for RetrievalEngine<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalEngine")
            .field("documents", &self.documents.len())
            .field("dimension", &self.index.dimension())
            .field("provider", &self.provider.provider_name())
            .field("config", &self.config)
            .finish()
    }
}

impl RetrievalEngine<FlatIndex> {
    /// Build a brute-force engine with the default configuration.
    ///
    /// Fails with `EmptyCorpus` for an empty corpus. Provider failures are
    /// returned as `ProviderUnavailable` without retrying.
    pub async fn build(
        documents: Vec<String>,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self> {
        Self::build_with_config(documents, provider, EngineConfig::default()).await
    }
}

impl<I: VectorIndex> RetrievalEngine<I> {
    /// Build an engine with an explicit index type and configuration.
    pub async fn build_with_config(
        documents: Vec<String>,
        provider: Arc<dyn EmbeddingProvider>,
        config: EngineConfig,
    ) -> Result<Self> {
        if documents.is_empty() {
            return Err(RetrievalError::EmptyCorpus);
        }

        info!(
            "Building retrieval engine over {} documents with provider {}",
            documents.len(),
            provider.provider_name()
        );

        let embeddings = provider.encode(&documents).await.inspect_err(|e| {
            warn!("Embedding the corpus failed: {}", e);
        })?;

        if embeddings.len() != documents.len() {
            return Err(EmbedError::unavailable(format!(
                "Provider {} returned {} embeddings for {} documents",
                provider.provider_name(),
                embeddings.len(),
                documents.len()
            ))
            .into());
        }

        let index = I::build(embeddings.into_embeddings())?;
        let documents = DocumentStore::new(documents);

        info!(
            "Index built successfully with {} documents (dimension {})",
            index.len(),
            index.dimension()
        );

        Ok(Self {
            documents: Arc::new(documents),
            index: Arc::new(index),
            provider,
            config,
        })
    }

    /// The `k` documents nearest to `question`, closest first.
    ///
    /// Returns exactly `min(k, corpus size)` results; ties are broken by
    /// ascending document id. Fails with `EmptyQuestion` for blank input and
    /// `InvalidK` for `k == 0` (or `k` above the corpus size in strict mode).
    pub async fn query(&self, question: &str, k: usize) -> Result<Vec<ScoredDocument>> {
        if question.trim().is_empty() {
            return Err(RetrievalError::EmptyQuestion);
        }
        if k == 0 || (self.config.strict_k && k > self.index.len()) {
            return Err(RetrievalError::InvalidK { k });
        }

        debug!("Searching for {:?} (k = {})", question, k);

        let embedded = self
            .provider
            .encode(&[question.to_string()])
            .await
            .inspect_err(|e| warn!("Embedding the question failed: {}", e))?;

        let vector = match <[Vec<f32>; 1]>::try_from(embedded.into_embeddings()) {
            Ok([vector]) => vector,
            Err(other) => {
                return Err(EmbedError::unavailable(format!(
                    "Provider {} returned {} embeddings for one question",
                    self.provider.provider_name(),
                    other.len()
                ))
                .into());
            }
        };

        let results = self
            .index
            .search(&vector, k)?
            .into_iter()
            .map(|neighbor| {
                Ok(ScoredDocument {
                    document: self.documents.get(neighbor.id)?.clone(),
                    distance: neighbor.distance,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Retrieved {} documents", results.len());
        Ok(results)
    }

    /// [`RetrievalEngine::query`] with the configured default `k`.
    pub async fn query_default(&self, question: &str) -> Result<Vec<ScoredDocument>> {
        self.query(question, self.config.default_k).await
    }

    /// Build a new engine over a different corpus with the same provider and
    /// configuration. `self` is left untouched.
    pub async fn rebuild(&self, documents: Vec<String>) -> Result<Self> {
        Self::build_with_config(documents, Arc::clone(&self.provider), self.config.clone()).await
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            documents: self.documents.len(),
            dimension: self.index.dimension(),
            provider: self.provider.provider_name().to_string(),
        }
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
