//! Deterministic bag-of-words embeddings via feature hashing
//!
//! Each token is lower-cased, looked up in the stop word list, and hashed with
//! FNV-1a into one of `dimension` buckets. A text's vector is the per-bucket
//! token count, L2-normalized unless disabled. No model files, no network, and the
//! output is stable across processes, which makes it the provider of choice
//! for tests and offline demos.

use crate::config::HashingConfig;
use crate::error::Result;
use crate::provider::{EmbeddingProvider, EmbeddingResult, l2_normalize};
use async_trait::async_trait;
use fnv::{FnvHashSet, FnvHasher};
use std::hash::Hasher;

/// Feature-hashing embedding provider.
#[derive(Debug, Clone)]
pub struct HashingProvider {
    config: HashingConfig,
    stop_words: FnvHashSet<String>,
}

impl HashingProvider {
    /// Create a provider, rejecting a zero dimension.
    pub fn new(config: HashingConfig) -> Result<Self> {
        config.validate()?;
        let stop_words = config
            .stop_words
            .iter()
            .map(|w| w.to_lowercase())
            .collect();
        Ok(Self { config, stop_words })
    }

    /// Create a provider with default settings and the given dimension.
    pub fn with_dimension(dimension: usize) -> Result<Self> {
        Self::new(HashingConfig::new(dimension))
    }

    /// Bucket a token lands in.
    pub fn bucket(&self, token: &str) -> usize {
        let mut hasher = FnvHasher::default();
        hasher.write(token.as_bytes());
        (hasher.finish() % self.config.dimension as u64) as usize
    }

    fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .filter(move |t| !self.stop_words.contains(t))
    }

    /// Embed a single text synchronously.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.config.dimension];
        for token in self.tokens(text) {
            vector[self.bucket(&token)] += 1.0;
        }
        if self.config.normalize {
            l2_normalize(&mut vector);
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for HashingProvider {
    async fn encode(&self, texts: &[String]) -> Result<EmbeddingResult> {
        let embeddings = texts.iter().map(|text| self.embed(text)).collect();
        Ok(EmbeddingResult::new(embeddings))
    }

    fn embedding_dimension(&self) -> usize {
        self.config.dimension
    }

    fn provider_name(&self) -> &str {
        "hashing"
    }
}
