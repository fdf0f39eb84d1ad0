use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::EmbeddingProvider;
use crate::error::{PatientError, PatientResult};
use crate::models::{EmbeddingProviderType, EmbeddingResult};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "text-embedding-3-small";

/// OpenAI embedding provider configuration
#[derive(Debug, Clone)]
pub struct OpenAIEmbeddingConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Requested output dimension; text-embedding-3 models can shorten
    /// their native vectors to match the collection (768 here).
    pub dimension: u32,
}

impl OpenAIEmbeddingConfig {
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

    pub fn from_env() -> PatientResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| PatientError::Config("OPENAI_API_KEY not set".to_string()))?;

        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let model = std::env::var("OPENAI_EMBEDDING_MODEL")
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

/// OpenAI embeddings provider
pub struct OpenAIEmbeddings {
    client: Client,
    config: OpenAIEmbeddingConfig,
}

impl OpenAIEmbeddings {
    pub fn new(config: OpenAIEmbeddingConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn from_env() -> PatientResult<Self> {
        Ok(Self::new(OpenAIEmbeddingConfig::from_env()?))
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    input: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OpenAIEmbeddings {
    fn provider_type(&self) -> EmbeddingProviderType {
        EmbeddingProviderType::OpenAI
    }

    fn dimension(&self) -> u32 {
        self.config.dimension
    }

    async fn embed(&self, text: &str) -> PatientResult<EmbeddingResult> {
        let request = EmbeddingRequest {
            model: self.config.model.clone(),
            input: vec![text.to_string()],
            dimensions: Some(self.config.dimension),
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(PatientError::Embedding(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let embedding_response: EmbeddingResponse = response.json().await?;

        embedding_response
            .data
            .into_iter()
            .next()
            .map(|d| EmbeddingResult::new(d.embedding))
            .ok_or_else(|| PatientError::Embedding("No embedding returned".to_string()))
    }
}
