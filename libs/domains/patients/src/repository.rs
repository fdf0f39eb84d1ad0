use async_trait::async_trait;
use uuid::Uuid;

use crate::error::PatientResult;
use crate::models::{CollectionSpec, PatientMatch, PatientRecord, SearchQuery};

/// Repository trait for the patient-record vector store.
///
/// This trait abstracts the underlying vector database (Qdrant). The
/// store owns all persistence; implementations add no logic beyond the
/// delegated calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorRepository: Send + Sync {
    /// Create the record collection if it does not exist yet.
    ///
    /// Returns `true` when the collection was created, `false` when it
    /// already existed.
    async fn ensure_collection(&self, spec: &CollectionSpec) -> PatientResult<bool>;

    /// Upsert a single record. Caller-supplied ids make this idempotent;
    /// uniqueness is the store's concern.
    async fn upsert(&self, collection: &str, record: PatientRecord) -> PatientResult<Uuid>;

    /// Top-k similarity search with payloads.
    async fn search(&self, collection: &str, query: SearchQuery)
        -> PatientResult<Vec<PatientMatch>>;

    /// Connectivity probe for readiness checks.
    async fn ping(&self) -> PatientResult<()>;
}
