use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Distance metric for similarity calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum DistanceMetric {
    #[default]
    Cosine,
    Euclidean,
    DotProduct,
}

/// Configuration of the record collection in the vector store.
///
/// The dimension is fixed at startup and every stored or queried vector
/// must match it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CollectionSpec {
    pub name: String,
    pub dimension: u32,
    pub distance: DistanceMetric,
}

impl CollectionSpec {
    pub fn new(name: String, dimension: u32) -> Self {
        Self {
            name,
            dimension,
            distance: DistanceMetric::default(),
        }
    }

    pub fn with_distance(mut self, distance: DistanceMetric) -> Self {
        self.distance = distance;
        self
    }
}

/// A patient record as written to the vector store.
///
/// Immutable once inserted; there are no update or delete operations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatientRecord {
    pub id: Uuid,
    pub values: Vec<f32>,
    pub attributes: Option<serde_json::Value>,
}

impl PatientRecord {
    pub fn new(id: Uuid, values: Vec<f32>) -> Self {
        Self {
            id,
            values,
            attributes: None,
        }
    }

    pub fn with_attributes(mut self, attributes: serde_json::Value) -> Self {
        self.attributes = Some(attributes);
        self
    }
}

/// Insertion input as received from the client.
///
/// Fields are optional because presence is part of request validation:
/// the service rejects any missing field with a descriptive message
/// before the embedding stage runs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InsertPatient {
    pub patient_id: Option<Uuid>,
    pub text: Option<String>,
    pub attributes: Option<serde_json::Value>,
}

/// Search query parameters sent to the vector store
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchQuery {
    pub vector: Vec<f32>,
    pub limit: u32,
    pub score_threshold: Option<f32>,
    pub with_payloads: bool,
}

impl SearchQuery {
    pub fn new(vector: Vec<f32>, limit: u32) -> Self {
        Self {
            vector,
            limit,
            score_threshold: None,
            with_payloads: true,
        }
    }

    pub fn with_score_threshold(mut self, threshold: Option<f32>) -> Self {
        self.score_threshold = threshold;
        self
    }
}

/// A ranked similarity match, converted from the store's scored-point
/// shape immediately at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatientMatch {
    pub id: Uuid,
    pub score: f32,
    pub attributes: Option<serde_json::Value>,
}

impl PatientMatch {
    pub fn new(id: Uuid, score: f32, attributes: Option<serde_json::Value>) -> Self {
        Self {
            id,
            score,
            attributes,
        }
    }
}

/// Embedding provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderType {
    #[default]
    Gemini,
    OpenAI,
}

/// Embedding result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmbeddingResult {
    pub values: Vec<f32>,
    pub dimension: u32,
}

impl EmbeddingResult {
    pub fn new(values: Vec<f32>) -> Self {
        Self {
            dimension: values.len() as u32,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_spec_defaults_to_cosine() {
        let spec = CollectionSpec::new("patients".to_string(), 768);
        assert_eq!(spec.distance, DistanceMetric::Cosine);
        assert_eq!(spec.dimension, 768);
    }

    #[test]
    fn test_search_query_defaults() {
        let query = SearchQuery::new(vec![0.1, 0.2], 5);
        assert!(query.with_payloads);
        assert!(query.score_threshold.is_none());
    }

    #[test]
    fn test_embedding_result_tracks_dimension() {
        let result = EmbeddingResult::new(vec![0.0; 768]);
        assert_eq!(result.dimension, 768);
    }
}
