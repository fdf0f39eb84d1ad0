pub mod gemini;
pub mod provider;

pub use gemini::{GeminiConfig, GeminiProvider};
pub use provider::GenerativeProvider;
