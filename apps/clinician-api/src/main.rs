use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use domain_assistant::{
    AssistantService, GeminiProvider, HttpProfileDirectory, HttpTaskQueue, ProfileDirectory,
    StaticProfileDirectory,
};
use domain_patients::{
    CollectionSpec, EmbeddingProvider, EmbeddingProviderType, GeminiEmbeddings, OpenAIEmbeddings,
    PatientService, QdrantRepository,
};
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    info!("Connecting to Qdrant at {}", config.qdrant.url);
    let repository = QdrantRepository::new(config.qdrant.clone()).await?;

    let embeddings: Arc<dyn EmbeddingProvider> = match config.embedding.provider {
        EmbeddingProviderType::Gemini => Arc::new(GeminiEmbeddings::from_env()?),
        EmbeddingProviderType::OpenAI => Arc::new(OpenAIEmbeddings::from_env()?),
    };

    let generator = Arc::new(GeminiProvider::new(config.generation.clone()));

    let profiles: Arc<dyn ProfileDirectory> = match &config.profile_service_url {
        Some(url) => Arc::new(HttpProfileDirectory::new(url.clone())),
        None => Arc::new(StaticProfileDirectory::new()),
    };

    let collection = CollectionSpec::new(
        config.qdrant.collection.clone(),
        config.embedding.dimension,
    );

    let patients = Arc::new(PatientService::new(repository, embeddings, collection));

    // Initialize the collection when the app starts
    if patients.ensure_collection().await? {
        info!("Created collection {}", config.qdrant.collection);
    } else {
        info!("Collection {} already exists", config.qdrant.collection);
    }

    let mut assistant = AssistantService::new(patients.clone(), generator, profiles);
    if let Some(url) = &config.task_queue_url {
        assistant = assistant.with_task_queue(Arc::new(HttpTaskQueue::new(url.clone())));
    }

    // Initialize the application state
    let state = AppState {
        config,
        patients,
        assistant: Arc::new(assistant),
    };

    // Build router with API routes
    let routes = api::routes(&state);

    // Create a router with OpenAPI docs
    let router = axum_helpers::create_router::<openapi::ApiDoc>(routes).await?;

    // Merge health endpoints
    let app = router.merge(health_router(state.config.app));

    let server_config = state.config.server.clone();

    info!("Starting Clinician Assistant API with graceful shutdown (30s timeout)");

    // Production-ready server with graceful shutdown
    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        info!("Shutting down: dropping client handles");
        drop(state);
        info!("Client handles released");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Clinician Assistant API shutdown complete");
    Ok(())
}
