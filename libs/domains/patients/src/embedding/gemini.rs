//! Gemini embedding provider implementation
//!
//! Uses the Generative Language API's `embedContent` endpoint. The API
//! key travels in the query string, which is how that API authenticates.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::EmbeddingProvider;
use crate::error::{PatientError, PatientResult};
use crate::models::{EmbeddingProviderType, EmbeddingResult};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "text-embedding-004";

/// Gemini embedding provider configuration
#[derive(Debug, Clone)]
pub struct GeminiEmbeddingConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Expected output dimension (text-embedding-004 produces 768)
    pub dimension: u32,
}

impl GeminiEmbeddingConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            dimension: 768,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn from_env() -> PatientResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| PatientError::Config("GEMINI_API_KEY not set".to_string()))?;

        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let model = std::env::var("GEMINI_EMBEDDING_MODEL")
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let dimension = std::env::var("EMBEDDING_DIMENSION")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(768);

        Ok(Self {
            api_key,
            base_url,
            model,
            dimension,
        })
    }
}

/// Gemini embeddings provider
pub struct GeminiEmbeddings {
    client: Client,
    config: GeminiEmbeddingConfig,
}

impl GeminiEmbeddings {
    pub fn new(config: GeminiEmbeddingConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn from_env() -> PatientResult<Self> {
        Ok(Self::new(GeminiEmbeddingConfig::from_env()?))
    }
}

#[derive(Debug, Serialize)]
struct EmbedContentRequest {
    model: String,
    content: EmbedContent,
}

#[derive(Debug, Serialize)]
struct EmbedContent {
    parts: Vec<EmbedPart>,
}

#[derive(Debug, Serialize)]
struct EmbedPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddings {
    fn provider_type(&self) -> EmbeddingProviderType {
        EmbeddingProviderType::Gemini
    }

    fn dimension(&self) -> u32 {
        self.config.dimension
    }

    async fn embed(&self, text: &str) -> PatientResult<EmbeddingResult> {
        let request = EmbedContentRequest {
            model: format!("models/{}", self.config.model),
            content: EmbedContent {
                parts: vec![EmbedPart {
                    text: text.to_string(),
                }],
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:embedContent?key={}",
                self.config.base_url, self.config.model, self.config.api_key
            ))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(PatientError::Embedding(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let embed_response: EmbedContentResponse = response.json().await?;

        Ok(EmbeddingResult::new(embed_response.embedding.values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn test_config(base_url: String) -> GeminiEmbeddingConfig {
        GeminiEmbeddingConfig::new("test-key".to_string()).with_base_url(base_url)
    }

    #[test]
    fn test_config_defaults() {
        let config = GeminiEmbeddingConfig::new("k".to_string());
        assert_eq!(config.model, "text-embedding-004");
        assert_eq!(config.dimension, 768);
    }

    #[tokio::test]
    async fn test_embed_parses_values() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/models/text-embedding-004:embedContent")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"embedding": {"values": [0.1, 0.2, 0.3]}}"#)
            .create_async()
            .await;

        let provider = GeminiEmbeddings::new(test_config(server.url()));
        let result = provider.embed("diabetic, on metformin").await.unwrap();

        assert_eq!(result.values, vec![0.1, 0.2, 0.3]);
        assert_eq!(result.dimension, 3);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_embed_surfaces_api_error() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/models/text-embedding-004:embedContent")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error": {"message": "API key not valid"}}"#)
            .create_async()
            .await;

        let provider = GeminiEmbeddings::new(test_config(server.url()));
        let err = provider.embed("text").await.unwrap_err();

        assert!(matches!(err, PatientError::Embedding(_)));
        assert!(err.to_string().contains("API key not valid"));
    }
}
