use async_trait::async_trait;

use crate::error::AssistantResult;

/// Trait for generative-language providers.
///
/// One prompt in, generated text out. `Ok(None)` means the provider
/// answered with no usable text (empty candidate list); callers decide
/// the fallback. No retries here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> AssistantResult<Option<String>>;
}
