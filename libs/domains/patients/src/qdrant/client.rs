use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::qdrant::{
    self, CreateCollectionBuilder, Distance, PointId, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, Value as QdrantValue, VectorParamsBuilder,
};
use qdrant_client::Qdrant;
use uuid::Uuid;

use super::QdrantConfig;
use crate::error::{PatientError, PatientResult};
use crate::models::{CollectionSpec, DistanceMetric, PatientMatch, PatientRecord, SearchQuery};
use crate::repository::VectorRepository;

/// Qdrant-backed implementation of VectorRepository
pub struct QdrantRepository {
    client: Qdrant,
}

impl QdrantRepository {
    pub async fn new(config: QdrantConfig) -> PatientResult<Self> {
        let mut builder = Qdrant::from_url(&config.url);

        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }

        builder = builder.timeout(Duration::from_secs(config.timeout_secs));

        let client = builder
            .build()
            .map_err(|e| PatientError::Qdrant(format!("Failed to build client: {}", e)))?;

        Ok(Self { client })
    }

    pub fn from_client(client: Qdrant) -> Self {
        Self { client }
    }

    fn to_qdrant_distance(metric: DistanceMetric) -> Distance {
        match metric {
            DistanceMetric::Cosine => Distance::Cosine,
            DistanceMetric::Euclidean => Distance::Euclid,
            DistanceMetric::DotProduct => Distance::Dot,
        }
    }

    fn uuid_to_point_id(id: Uuid) -> PointId {
        PointId::from(id.to_string())
    }

    fn point_id_to_uuid(point_id: &PointId) -> PatientResult<Uuid> {
        match &point_id.point_id_options {
            Some(qdrant::point_id::PointIdOptions::Uuid(uuid_str)) => Uuid::parse_str(uuid_str)
                .map_err(|e| PatientError::Internal(format!("Invalid UUID: {}", e))),
            Some(qdrant::point_id::PointIdOptions::Num(num)) => {
                // If stored as number, create UUID from it
                Ok(Uuid::from_u128(*num as u128))
            }
            None => Err(PatientError::Internal("Missing point ID".to_string())),
        }
    }

    fn attributes_to_payload(attributes: Option<serde_json::Value>) -> HashMap<String, QdrantValue> {
        let Some(serde_json::Value::Object(map)) = attributes else {
            return HashMap::new();
        };

        map.into_iter()
            .map(|(key, val)| (key, json_to_qdrant_value(val)))
            .collect()
    }

    fn payload_to_attributes(payload: HashMap<String, QdrantValue>) -> Option<serde_json::Value> {
        if payload.is_empty() {
            return None;
        }

        let mut map = serde_json::Map::new();
        for (key, val) in payload {
            if let Some(json_val) = qdrant_value_to_json(val) {
                map.insert(key, json_val);
            }
        }

        Some(serde_json::Value::Object(map))
    }
}

fn json_to_qdrant_value(val: serde_json::Value) -> QdrantValue {
    use qdrant::value::Kind;

    let kind = match val {
        serde_json::Value::Null => Kind::NullValue(0),
        serde_json::Value::Bool(b) => Kind::BoolValue(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Kind::IntegerValue(i)
            } else {
                Kind::DoubleValue(n.as_f64().unwrap_or(0.0))
            }
        }
        serde_json::Value::String(s) => Kind::StringValue(s),
        serde_json::Value::Array(items) => Kind::ListValue(qdrant::ListValue {
            values: items.into_iter().map(json_to_qdrant_value).collect(),
        }),
        serde_json::Value::Object(map) => Kind::StructValue(qdrant::Struct {
            fields: map
                .into_iter()
                .map(|(k, v)| (k, json_to_qdrant_value(v)))
                .collect(),
        }),
    };

    QdrantValue { kind: Some(kind) }
}

fn qdrant_value_to_json(val: QdrantValue) -> Option<serde_json::Value> {
    use qdrant::value::Kind;

    match val.kind {
        Some(Kind::NullValue(_)) => Some(serde_json::Value::Null),
        Some(Kind::BoolValue(b)) => Some(serde_json::Value::Bool(b)),
        Some(Kind::IntegerValue(i)) => Some(serde_json::Value::Number(i.into())),
        Some(Kind::DoubleValue(f)) => {
            serde_json::Number::from_f64(f).map(serde_json::Value::Number)
        }
        Some(Kind::StringValue(s)) => Some(serde_json::Value::String(s)),
        Some(Kind::ListValue(list)) => Some(serde_json::Value::Array(
            list.values
                .into_iter()
                .filter_map(qdrant_value_to_json)
                .collect(),
        )),
        Some(Kind::StructValue(fields)) => {
            let mut map = serde_json::Map::new();
            for (key, val) in fields.fields {
                if let Some(json_val) = qdrant_value_to_json(val) {
                    map.insert(key, json_val);
                }
            }
            Some(serde_json::Value::Object(map))
        }
        None => None,
    }
}

#[async_trait]
impl VectorRepository for QdrantRepository {
    async fn ensure_collection(&self, spec: &CollectionSpec) -> PatientResult<bool> {
        if self.client.collection_exists(&spec.name).await? {
            return Ok(false);
        }

        let builder = CreateCollectionBuilder::new(&spec.name).vectors_config(
            VectorParamsBuilder::new(
                spec.dimension as u64,
                Self::to_qdrant_distance(spec.distance),
            ),
        );

        self.client.create_collection(builder).await?;

        Ok(true)
    }

    async fn upsert(&self, collection: &str, record: PatientRecord) -> PatientResult<Uuid> {
        let id = record.id;

        let point = PointStruct::new(
            Self::uuid_to_point_id(id),
            record.values,
            Self::attributes_to_payload(record.attributes),
        );

        // wait(true) so an immediately following search sees the point
        let builder = UpsertPointsBuilder::new(collection, vec![point]).wait(true);

        self.client.upsert_points(builder).await?;

        Ok(id)
    }

    async fn search(
        &self,
        collection: &str,
        query: SearchQuery,
    ) -> PatientResult<Vec<PatientMatch>> {
        let mut builder = SearchPointsBuilder::new(collection, query.vector, query.limit as u64);

        if let Some(threshold) = query.score_threshold {
            builder = builder.score_threshold(threshold);
        }

        builder = builder.with_payload(query.with_payloads);

        let results = self.client.search_points(builder).await?;

        results
            .result
            .into_iter()
            .map(|point| {
                let id = point
                    .id
                    .as_ref()
                    .map(Self::point_id_to_uuid)
                    .transpose()?
                    .ok_or_else(|| PatientError::Internal("Missing point ID".to_string()))?;

                Ok(PatientMatch {
                    id,
                    score: point.score,
                    attributes: Self::payload_to_attributes(point.payload),
                })
            })
            .collect()
    }

    async fn ping(&self) -> PatientResult<()> {
        self.client.health_check().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_uuid_point_id_round_trip() {
        let id = Uuid::new_v4();
        let point_id = QdrantRepository::uuid_to_point_id(id);
        let parsed = QdrantRepository::point_id_to_uuid(&point_id).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_numeric_point_id_maps_to_uuid() {
        let point_id = PointId::from(42u64);
        let parsed = QdrantRepository::point_id_to_uuid(&point_id).unwrap();
        assert_eq!(parsed, Uuid::from_u128(42));
    }

    #[test]
    fn test_attributes_payload_round_trip() {
        let attributes = json!({
            "name": "Jane Doe",
            "age": 54,
            "risk": 0.25,
            "active": true,
            "medications": ["metformin", "lisinopril"],
            "contact": {"phone": "555-0100"}
        });

        let payload = QdrantRepository::attributes_to_payload(Some(attributes.clone()));
        let restored = QdrantRepository::payload_to_attributes(payload).unwrap();

        assert_eq!(restored, attributes);
    }

    #[test]
    fn test_non_object_attributes_become_empty_payload() {
        let payload = QdrantRepository::attributes_to_payload(Some(json!("just a string")));
        assert!(payload.is_empty());

        let payload = QdrantRepository::attributes_to_payload(None);
        assert!(payload.is_empty());
    }

    #[test]
    fn test_empty_payload_maps_to_no_attributes() {
        assert!(QdrantRepository::payload_to_attributes(HashMap::new()).is_none());
    }

    #[test]
    fn test_distance_conversion() {
        assert_eq!(
            QdrantRepository::to_qdrant_distance(DistanceMetric::Cosine),
            Distance::Cosine
        );
        assert_eq!(
            QdrantRepository::to_qdrant_distance(DistanceMetric::Euclidean),
            Distance::Euclid
        );
        assert_eq!(
            QdrantRepository::to_qdrant_distance(DistanceMetric::DotProduct),
            Distance::Dot
        );
    }
}
