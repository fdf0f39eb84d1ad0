use core_config::{app_info, env_or_default, server::ServerConfig, AppInfo, FromEnv};
use domain_assistant::GeminiConfig;
use domain_patients::{EmbeddingProviderType, QdrantConfig};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library and
/// the domain crates' client configurations.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub qdrant: QdrantConfig,
    pub embedding: EmbeddingSettings,
    pub generation: GeminiConfig,
    /// External profile service base URL; the static in-memory table is
    /// used when unset.
    pub profile_service_url: Option<String>,
    /// Task-queue endpoint; /schedule_task reports a config error when unset.
    pub task_queue_url: Option<String>,
}

/// Which embedding provider to construct, and the fixed vector dimension
/// shared with the record collection.
#[derive(Clone, Debug)]
pub struct EmbeddingSettings {
    pub provider: EmbeddingProviderType,
    pub dimension: u32,
}

impl EmbeddingSettings {
    fn from_env() -> Self {
        let provider = match env_or_default("EMBEDDING_PROVIDER", "gemini").to_lowercase().as_str()
        {
            "openai" => EmbeddingProviderType::OpenAI,
            _ => EmbeddingProviderType::Gemini,
        };

        let dimension = std::env::var("EMBEDDING_DIMENSION")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(768);

        Self {
            provider,
            dimension,
        }
    }
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let qdrant = QdrantConfig::from_env()?;
        let embedding = EmbeddingSettings::from_env();
        let generation = GeminiConfig::from_env()?;

        let profile_service_url = std::env::var("PROFILE_SERVICE_URL").ok();
        let task_queue_url = std::env::var("TASK_QUEUE_URL").ok();

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            qdrant,
            embedding,
            generation,
            profile_service_url,
            task_queue_url,
        })
    }
}
