//! Patient Records Domain Library
//!
//! This module provides the patient-record domain: embedding generation for
//! free-text clinical notes and similarity search over the Qdrant-backed
//! record store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ PatientService  │  ← validation, embed-then-upsert / embed-then-search
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐     ┌──────────────────┐
//! │ VectorRepository│     │ EmbeddingProvider│
//! │   (trait)       │     │    (trait)       │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//! ┌────────▼────────┐     ┌────────▼─────────┐
//! │ QdrantRepository│     │ GeminiEmbeddings │
//! │ (implementation)│     │ OpenAIEmbeddings │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_patients::{
//!     CollectionSpec, GeminiEmbeddings, GeminiEmbeddingConfig, InsertPatient,
//!     PatientService, QdrantConfig, QdrantRepository,
//! };
//! use std::sync::Arc;
//! use uuid::Uuid;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = QdrantRepository::new(QdrantConfig::from_env()?).await?;
//! let embeddings = Arc::new(GeminiEmbeddings::new(GeminiEmbeddingConfig::from_env()?));
//! let collection = CollectionSpec::new("patients".to_string(), 768);
//!
//! let service = PatientService::new(repository, embeddings, collection);
//! service.ensure_collection().await?;
//!
//! service
//!     .insert_patient(InsertPatient {
//!         patient_id: Some(Uuid::new_v4()),
//!         text: Some("Type 2 diabetes, metformin 500mg".to_string()),
//!         attributes: Some(serde_json::json!({"age": 54})),
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod embedding;
pub mod error;
pub mod handlers;
pub mod models;
pub mod qdrant;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use embedding::{
    EmbeddingProvider, GeminiEmbeddingConfig, GeminiEmbeddings, OpenAIEmbeddingConfig,
    OpenAIEmbeddings,
};
pub use error::{PatientError, PatientResult};
pub use handlers::PatientsApiDoc;
pub use models::{
    CollectionSpec, DistanceMetric, EmbeddingProviderType, EmbeddingResult, InsertPatient,
    PatientMatch, PatientRecord, SearchQuery,
};
pub use qdrant::{QdrantConfig, QdrantRepository};
pub use repository::VectorRepository;
pub use service::{PatientService, DEFAULT_SEARCH_LIMIT};
