//! Application state management.
//!
//! The shared state holds the configuration and the domain service
//! handles built once at startup. Handlers receive it via cheap Arc
//! clones; there is no other state shared across requests.

use std::sync::Arc;

use domain_assistant::AssistantService;
use domain_patients::{PatientService, QdrantRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Patient-record service (embeddings + Qdrant)
    pub patients: Arc<PatientService<QdrantRepository>>,
    /// Assistant service (generation, profiles, chat orchestration)
    pub assistant: Arc<AssistantService<QdrantRepository>>,
}
