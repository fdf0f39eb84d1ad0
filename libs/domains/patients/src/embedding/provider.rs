use async_trait::async_trait;

use crate::error::PatientResult;
use crate::models::{EmbeddingProviderType, EmbeddingResult};

/// Trait for embedding generation providers
///
/// Implementations call an external embedding API and return a
/// fixed-length vector. The configured output dimension must match the
/// record collection's dimension.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get the provider type
    fn provider_type(&self) -> EmbeddingProviderType;

    /// The fixed output dimension this provider is configured for
    fn dimension(&self) -> u32;

    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> PatientResult<EmbeddingResult>;
}
