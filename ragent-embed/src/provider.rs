//! Embedding provider trait and the FastEmbed implementation

use crate::config::EmbedConfig;
use crate::error::{EmbedError, Result};
use async_trait::async_trait;
use fastembed::{InitOptions, TextEmbedding};
use std::sync::{Arc, Mutex};

/// Result of embedding generation
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingResult {
    /// The generated embeddings, one per input text
    pub embeddings: Vec<Vec<f32>>,
    /// The dimension of each embedding vector
    pub dimension: usize,
}

impl EmbeddingResult {
    /// Create a new embedding result.
    ///
    /// The dimension is inferred from the first embedding vector and defaults
    /// to 0 when there are no embeddings.
    pub fn new(embeddings: Vec<Vec<f32>>) -> Self {
        let dimension = embeddings.first().map(|e| e.len()).unwrap_or(0);
        Self {
            embeddings,
            dimension,
        }
    }

    /// Returns the number of embedding vectors in this result.
    pub fn len(&self) -> usize {
        self.embeddings.len()
    }

    /// Returns `true` if this result contains no embedding vectors.
    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }

    /// Consume the result, returning the raw vectors.
    pub fn into_embeddings(self) -> Vec<Vec<f32>> {
        self.embeddings
    }
}

/// Maps text to fixed-dimension vectors.
///
/// Implementations must return exactly one vector per input text, in input
/// order, all with [`EmbeddingProvider::embedding_dimension`] entries. An empty
/// input yields an empty result rather than an error. The same text must map
/// to the same vector for at least the lifetime of the provider.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embeddings for a batch of texts
    async fn encode(&self, texts: &[String]) -> Result<EmbeddingResult>;

    /// Generate the embedding for a single text
    async fn encode_one(&self, text: &str) -> Result<Vec<f32>> {
        let result = self.encode(&[text.to_string()]).await?;
        result
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| EmbedError::unavailable("No embedding generated for text"))
    }

    /// Get the dimension of embeddings produced by this provider
    fn embedding_dimension(&self) -> usize;

    /// Get the name/identifier of this provider
    fn provider_name(&self) -> &str;
}

#[async_trait]
impl<P: EmbeddingProvider + ?Sized> EmbeddingProvider for Arc<P> {
    async fn encode(&self, texts: &[String]) -> Result<EmbeddingResult> {
        (**self).encode(texts).await
    }

    fn embedding_dimension(&self) -> usize {
        (**self).embedding_dimension()
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}

/// FastEmbed-based provider running a local ONNX sentence-embedding model.
///
/// The model is owned by the provider value; build one with
/// [`FastEmbedProvider::create`] and share it with `Arc` if several engines
/// need it.
#[derive(Clone)]
pub struct FastEmbedProvider {
    config: EmbedConfig,
    model: Arc<Mutex<TextEmbedding>>,
    dimension: usize,
}

impl std::fmt::Debug for FastEmbedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastEmbedProvider")
            .field("config", &self.config)
            .field("dimension", &self.dimension)
            .finish()
    }
}

impl FastEmbedProvider {
    /// Load (downloading if needed) the configured model and probe its dimension.
    pub async fn create(config: EmbedConfig) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            "Initializing FastEmbed provider for model: {}",
            config.model_name()
        );

        let load_config = config.clone();
        let (model, dimension) =
            tokio::task::spawn_blocking(move || -> Result<(TextEmbedding, usize)> {
                let init_options = InitOptions::new(load_config.model.to_fastembed())
                    .with_cache_dir(load_config.cache_dir.clone())
                    .with_show_download_progress(load_config.show_download_progress);

                let mut model =
                    TextEmbedding::try_new(init_options).map_err(EmbedError::model_init)?;

                // Probe the dimension with a throwaway embedding
                let probe = model
                    .embed(vec!["dimension probe".to_string()], None)
                    .map_err(EmbedError::model_init)?;
                let dimension = probe.first().map(|emb| emb.len()).unwrap_or(0);
                if dimension == 0 {
                    return Err(EmbedError::unavailable("Model produced an empty embedding"));
                }

                tracing::info!(
                    "Model {} loaded successfully. Dimension: {}",
                    load_config.model_name(),
                    dimension
                );
                Ok((model, dimension))
            })
            .await??;

        Ok(Self {
            config,
            model: Arc::new(Mutex::new(model)),
            dimension,
        })
    }

    /// The configuration this provider was created with
    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }
}

/// Scale a vector to unit length in place; zero vectors are left untouched.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

#[async_trait]
impl EmbeddingProvider for FastEmbedProvider {
    async fn encode(&self, texts: &[String]) -> Result<EmbeddingResult> {
        if texts.is_empty() {
            return Ok(EmbeddingResult::new(vec![]));
        }

        tracing::debug!("Generating embeddings for {} texts", texts.len());

        let mut all_embeddings = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.config.batch_size) {
            let chunk = chunk.to_vec();
            let model = Arc::clone(&self.model);

            let batch = tokio::task::spawn_blocking(move || -> Result<Vec<Vec<f32>>> {
                tracing::debug!("Processing batch of {} texts", chunk.len());
                let mut model = model
                    .lock()
                    .map_err(|_| EmbedError::unavailable("Embedding model lock poisoned"))?;
                model.embed(chunk, None).map_err(EmbedError::embedding_gen)
            })
            .await??;

            all_embeddings.extend(batch);
        }

        if all_embeddings.len() != texts.len() {
            return Err(EmbedError::unavailable(format!(
                "Model returned {} embeddings for {} texts",
                all_embeddings.len(),
                texts.len()
            )));
        }

        if self.config.normalize {
            for embedding in &mut all_embeddings {
                l2_normalize(embedding);
            }
        }

        tracing::debug!("Generated {} embeddings", all_embeddings.len());
        Ok(EmbeddingResult::new(all_embeddings))
    }

    fn embedding_dimension(&self) -> usize {
        self.dimension
    }

    fn provider_name(&self) -> &str {
        "fastembed"
    }
}
