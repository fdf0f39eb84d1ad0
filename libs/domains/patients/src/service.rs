use std::sync::Arc;

use uuid::Uuid;

use crate::embedding::EmbeddingProvider;
use crate::error::{PatientError, PatientResult};
use crate::models::{CollectionSpec, InsertPatient, PatientMatch, PatientRecord, SearchQuery};
use crate::repository::VectorRepository;

/// Fixed top-k for similarity search
pub const DEFAULT_SEARCH_LIMIT: u32 = 5;

/// Service layer for patient-record operations.
///
/// Every operation is a short sequential pipeline: validate the input,
/// delegate to the embedding provider, delegate to the vector store.
/// The service adds no ranking, filtering, or caching of its own.
pub struct PatientService<R: VectorRepository> {
    repository: Arc<R>,
    embeddings: Arc<dyn EmbeddingProvider>,
    collection: CollectionSpec,
}

impl<R: VectorRepository> PatientService<R> {
    pub fn new(
        repository: R,
        embeddings: Arc<dyn EmbeddingProvider>,
        collection: CollectionSpec,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            embeddings,
            collection,
        }
    }

    pub fn collection(&self) -> &CollectionSpec {
        &self.collection
    }

    /// Create the record collection if it does not exist yet.
    pub async fn ensure_collection(&self) -> PatientResult<bool> {
        let created = self.repository.ensure_collection(&self.collection).await?;
        if created {
            tracing::info!(
                collection = %self.collection.name,
                dimension = self.collection.dimension,
                "Created record collection"
            );
        }
        Ok(created)
    }

    /// Insert one patient record: validate, embed the text, upsert.
    ///
    /// Validation happens before the embedding stage so a bad request
    /// never reaches the external provider.
    pub async fn insert_patient(&self, input: InsertPatient) -> PatientResult<Uuid> {
        let (patient_id, text, attributes) = match (input.patient_id, input.text, input.attributes)
        {
            (Some(id), Some(text), Some(attributes)) if !text.trim().is_empty() => {
                (id, text, attributes)
            }
            _ => {
                return Err(PatientError::Validation(
                    "Missing patient_id, text, or attributes".to_string(),
                ))
            }
        };

        let embedding = self.embed_checked(&text).await?;

        let record = PatientRecord::new(patient_id, embedding).with_attributes(attributes);

        self.repository.upsert(&self.collection.name, record).await
    }

    /// Top-k similarity search for the given free text.
    ///
    /// An optional score threshold is forwarded verbatim to the store;
    /// no local filtering is applied. An empty result is not an error.
    pub async fn search_similar(
        &self,
        text: Option<String>,
        score_threshold: Option<f32>,
    ) -> PatientResult<Vec<PatientMatch>> {
        let text = match text {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(PatientError::Validation("Missing text".to_string())),
        };

        let embedding = self.embed_checked(&text).await?;

        let query = SearchQuery::new(embedding, DEFAULT_SEARCH_LIMIT)
            .with_score_threshold(score_threshold);

        self.repository.search(&self.collection.name, query).await
    }

    /// Connectivity probe for readiness checks.
    pub async fn ping(&self) -> PatientResult<()> {
        self.repository.ping().await
    }

    /// Embed text and enforce the collection's fixed dimensionality.
    async fn embed_checked(&self, text: &str) -> PatientResult<Vec<f32>> {
        let embedding = self.embeddings.embed(text).await?;

        if embedding.dimension != self.collection.dimension {
            return Err(PatientError::Embedding(format!(
                "Embedding dimension {} does not match collection dimension {}",
                embedding.dimension, self.collection.dimension
            )));
        }

        Ok(embedding.values)
    }
}
