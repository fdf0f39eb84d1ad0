pub mod gemini;
pub mod openai;
pub mod provider;

pub use gemini::{GeminiEmbeddingConfig, GeminiEmbeddings};
pub use openai::{OpenAIEmbeddingConfig, OpenAIEmbeddings};
pub use provider::EmbeddingProvider;
