//! Deadline wrapper for slow or hung providers

use crate::error::{EmbedError, Result};
use crate::provider::{EmbeddingProvider, EmbeddingResult};
use async_trait::async_trait;
use std::time::Duration;

/// Bounds every `encode` call of the wrapped provider by a fixed timeout.
///
/// An expired deadline is reported as [`EmbedError::ProviderUnavailable`].
#[derive(Debug, Clone)]
pub struct TimeoutProvider<P> {
    inner: P,
    timeout: Duration,
}

impl<P: EmbeddingProvider> TimeoutProvider<P> {
    pub fn new(inner: P, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

#[async_trait]
impl<P: EmbeddingProvider> EmbeddingProvider for TimeoutProvider<P> {
    async fn encode(&self, texts: &[String]) -> Result<EmbeddingResult> {
        match tokio::time::timeout(self.timeout, self.inner.encode(texts)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    "Provider {} did not answer within {:?}",
                    self.inner.provider_name(),
                    self.timeout
                );
                Err(EmbedError::unavailable(format!(
                    "{} timed out after {:?}",
                    self.inner.provider_name(),
                    self.timeout
                )))
            }
        }
    }

    fn embedding_dimension(&self) -> usize {
        self.inner.embedding_dimension()
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HashingProvider;

    struct SlowProvider;

    #[async_trait]
    impl EmbeddingProvider for SlowProvider {
        async fn encode(&self, texts: &[String]) -> Result<EmbeddingResult> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(EmbeddingResult::new(vec![vec![0.0]; texts.len()]))
        }

        fn embedding_dimension(&self) -> usize {
            1
        }

        fn provider_name(&self) -> &str {
            "slow"
        }
    }

    #[tokio::test]
    async fn test_timeout_surfaces_as_unavailable() {
        let provider = TimeoutProvider::new(SlowProvider, Duration::from_millis(20));
        let err = provider
            .encode(&["hello".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, EmbedError::ProviderUnavailable { .. }));
        assert!(err.to_string().contains("slow timed out"));
    }

    #[tokio::test]
    async fn test_fast_provider_passes_through() {
        let inner = HashingProvider::with_dimension(16).unwrap();
        let expected = inner.embed("sun star");
        let provider = TimeoutProvider::new(inner, Duration::from_secs(5));

        assert_eq!(provider.provider_name(), "hashing");
        assert_eq!(provider.embedding_dimension(), 16);
        assert_eq!(provider.encode_one("sun star").await.unwrap(), expected);
    }

    #[test]
    fn test_timeout_blocking_runtime() {
        let provider = TimeoutProvider::new(SlowProvider, Duration::from_millis(10));
        let result = tokio_test::block_on(provider.encode(&[]));
        assert!(result.is_err());
    }
}
