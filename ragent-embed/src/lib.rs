//! # ragent-embed
//!
//! Text embedding providers for the ragent retrieval engine. A provider turns a
//! batch of texts into fixed-dimension `f32` vectors through one narrow async
//! trait, [`EmbeddingProvider`], so the retrieval core never depends on a
//! concrete model.
//!
//! ## Providers
//!
//! - [`FastEmbedProvider`]: local ONNX sentence-embedding models via FastEmbed
//!   (all-MiniLM-L6-v2 by default)
//! - [`HashingProvider`]: deterministic feature-hashing bag-of-words, no model
//!   files needed
//! - [`TimeoutProvider`]: wraps any provider with a per-call deadline
//!
//! ## Quick Start
//!
//! ```no_run
//! use ragent_embed::{EmbedConfig, EmbeddingProvider, FastEmbedProvider};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = FastEmbedProvider::create(EmbedConfig::default()).await?;
//!
//! let texts = vec!["Hello world".to_string(), "How are you?".to_string()];
//! let result = provider.encode(&texts).await?;
//!
//! println!("Generated {} embeddings of dimension {}",
//!          result.len(), result.dimension);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T>`] using the crate's [`EmbedError`] type.
//! Model and runtime failures are all "provider unavailable" conditions
//! (see [`EmbedError::is_unavailable`]); providers never retry internally.

pub mod config;
pub mod error;
pub mod hashing;
pub mod provider;
pub mod timeout;

// Re-export main types for easy access
pub use config::{EmbedConfig, EmbedModel, HashingConfig};
pub use error::{EmbedError, Result};
pub use hashing::HashingProvider;
pub use provider::{EmbeddingProvider, EmbeddingResult, FastEmbedProvider};
pub use timeout::TimeoutProvider;
