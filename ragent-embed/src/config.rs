//! Configuration for embedding providers

use crate::error::{EmbedError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sentence-embedding models available through [`crate::FastEmbedProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmbedModel {
    /// sentence-transformers/all-MiniLM-L6-v2 (384 dimensions)
    #[default]
    AllMiniLmL6V2,
    /// BAAI/bge-small-en-v1.5 (384 dimensions)
    BgeSmallEnV15,
    /// nomic-ai/nomic-embed-text-v1.5 (768 dimensions)
    NomicEmbedTextV15,
}

impl EmbedModel {
    /// Short name used in logs and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::AllMiniLmL6V2 => "all-MiniLM-L6-v2",
            Self::BgeSmallEnV15 => "bge-small-en-v1.5",
            Self::NomicEmbedTextV15 => "nomic-embed-text-v1.5",
        }
    }

    pub(crate) fn to_fastembed(self) -> fastembed::EmbeddingModel {
        match self {
            Self::AllMiniLmL6V2 => fastembed::EmbeddingModel::AllMiniLML6V2,
            Self::BgeSmallEnV15 => fastembed::EmbeddingModel::BGESmallENV15,
            Self::NomicEmbedTextV15 => fastembed::EmbeddingModel::NomicEmbedTextV15,
        }
    }
}

impl std::str::FromStr for EmbedModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all-minilm-l6-v2" | "minilm" => Ok(Self::AllMiniLmL6V2),
            "bge-small-en-v1.5" | "bge-small" => Ok(Self::BgeSmallEnV15),
            "nomic-embed-text-v1.5" | "nomic" => Ok(Self::NomicEmbedTextV15),
            _ => Err(format!("Unknown embedding model: {s}")),
        }
    }
}

/// Configuration for the local ONNX embedding provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// Which model to load
    pub model: EmbedModel,
    /// Directory where model weights are cached between runs
    pub cache_dir: PathBuf,
    /// Maximum batch size for embedding generation
    pub batch_size: usize,
    /// Whether to L2-normalize embeddings
    pub normalize: bool,
    /// Whether to print download progress when weights are fetched
    pub show_download_progress: bool,
}

impl EmbedConfig {
    /// Create a configuration for the given model with default settings.
    pub fn new(model: EmbedModel) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    /// Set the cache directory for model weights (builder style)
    pub fn with_cache_dir<P: Into<PathBuf>>(self, cache_dir: P) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            ..self
        }
    }

    /// Set the batch size for embedding generation (builder style)
    pub fn with_batch_size(self, batch_size: usize) -> Self {
        Self { batch_size, ..self }
    }

    /// Set whether to normalize embeddings (builder style)
    pub fn with_normalize(self, normalize: bool) -> Self {
        Self { normalize, ..self }
    }

    /// Set whether download progress is shown (builder style)
    pub fn with_download_progress(self, show_download_progress: bool) -> Self {
        Self {
            show_download_progress,
            ..self
        }
    }

    /// Name of the configured model
    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }

    /// Check the configuration for values that can never work.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(EmbedError::invalid_config("batch_size must be at least 1"));
        }
        Ok(())
    }
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            model: EmbedModel::default(),
            cache_dir: PathBuf::from(".fastembed_cache"),
            batch_size: 32,
            normalize: true,
            show_download_progress: false,
        }
    }
}

/// Words dropped by [`crate::HashingProvider`] before hashing.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "do", "does", "for", "from", "how", "in",
    "is", "it", "of", "on", "or", "that", "the", "to", "was", "what", "which", "who", "why",
    "with", "you",
];

/// Configuration for the deterministic hashing provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashingConfig {
    /// Number of hash buckets, i.e. the embedding dimension
    pub dimension: usize,
    /// Whether to L2-normalize embeddings, so long texts are not penalized
    pub normalize: bool,
    /// Tokens ignored when building a vector (compared lower-cased)
    pub stop_words: Vec<String>,
}

impl HashingConfig {
    /// Create a configuration with the given dimension and default settings.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            ..Self::default()
        }
    }

    /// Set whether to normalize embeddings (builder style)
    pub fn with_normalize(self, normalize: bool) -> Self {
        Self { normalize, ..self }
    }

    /// Replace the stop word list (builder style)
    pub fn with_stop_words<I, S>(self, stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stop_words: stop_words.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// Check the configuration for values that can never work.
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(EmbedError::invalid_config("dimension must be at least 1"));
        }
        Ok(())
    }
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            dimension: 256,
            normalize: true,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_defaults() {
        let config = EmbedConfig::default();

        assert_eq!(config.model, EmbedModel::AllMiniLmL6V2);
        assert_eq!(config.model_name(), "all-MiniLM-L6-v2");
        assert_eq!(config.batch_size, 32);
        assert!(config.normalize);
        assert_eq!(config.cache_dir, PathBuf::from(".fastembed_cache"));
    }

    #[test]
    fn test_config_builder_methods() {
        let temp_dir = tempdir().unwrap();
        let config = EmbedConfig::new(EmbedModel::BgeSmallEnV15)
            .with_cache_dir(temp_dir.path())
            .with_batch_size(64)
            .with_normalize(false);

        assert_eq!(config.model_name(), "bge-small-en-v1.5");
        assert_eq!(config.cache_dir, temp_dir.path());
        assert_eq!(config.batch_size, 64);
        assert!(!config.normalize);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = EmbedConfig::default().with_batch_size(0);
        assert!(matches!(
            config.validate(),
            Err(EmbedError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_model_parsing() {
        assert_eq!("minilm".parse::<EmbedModel>(), Ok(EmbedModel::AllMiniLmL6V2));
        assert_eq!(
            "BGE-Small-EN-v1.5".parse::<EmbedModel>(),
            Ok(EmbedModel::BgeSmallEnV15)
        );
        assert!("word2vec".parse::<EmbedModel>().is_err());
    }

    #[test]
    fn test_config_serializes() {
        let json = serde_json::to_value(EmbedConfig::default()).unwrap();
        assert_eq!(json["model"], "all-mini-lm-l6-v2");
        assert_eq!(json["batch_size"], 32);
    }

    #[test]
    fn test_hashing_config() {
        let config = HashingConfig::new(64);
        assert_eq!(config.dimension, 64);
        assert!(config.normalize);
        assert!(!config.clone().with_normalize(false).normalize);
        assert!(config.stop_words.iter().any(|w| w == "the"));

        let config = config.with_stop_words(["foo"]);
        assert_eq!(config.stop_words, vec!["foo".to_string()]);

        assert!(HashingConfig::new(0).validate().is_err());
    }
}
