//! Handler tests for the assistant domain
//!
//! These tests drive the HTTP endpoints end to end against in-test stubs
//! for the vector store, embedding provider, generative provider, and
//! profile directory.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_assistant::{
    handlers, AssistantError, AssistantResult, AssistantService, ClinicianProfile,
    GenerativeProvider, ProfileDirectory, TaskQueue, FALLBACK_SUMMARY,
};
use domain_patients::{
    CollectionSpec, EmbeddingProvider, EmbeddingProviderType, EmbeddingResult, PatientMatch,
    PatientRecord, PatientResult, PatientService, SearchQuery, VectorRepository,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

const DIMENSION: u32 = 768;

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

struct FixedEmbeddings;

#[async_trait]
impl EmbeddingProvider for FixedEmbeddings {
    fn provider_type(&self) -> EmbeddingProviderType {
        EmbeddingProviderType::Gemini
    }

    fn dimension(&self) -> u32 {
        DIMENSION
    }

    async fn embed(&self, _text: &str) -> PatientResult<EmbeddingResult> {
        Ok(EmbeddingResult::new(vec![0.1; DIMENSION as usize]))
    }
}

#[derive(Default)]
struct StubRepository {
    matches: Vec<PatientMatch>,
}

#[async_trait]
impl VectorRepository for StubRepository {
    async fn ensure_collection(&self, _spec: &CollectionSpec) -> PatientResult<bool> {
        Ok(false)
    }

    async fn upsert(&self, _collection: &str, record: PatientRecord) -> PatientResult<Uuid> {
        Ok(record.id)
    }

    async fn search(
        &self,
        _collection: &str,
        _query: SearchQuery,
    ) -> PatientResult<Vec<PatientMatch>> {
        Ok(self.matches.clone())
    }

    async fn ping(&self) -> PatientResult<()> {
        Ok(())
    }
}

struct StubGenerator {
    reply: AssistantResult<Option<String>>,
}

impl StubGenerator {
    fn answering(text: &str) -> Self {
        Self {
            reply: Ok(Some(text.to_string())),
        }
    }

    fn empty() -> Self {
        Self { reply: Ok(None) }
    }

    fn failing(message: &str) -> Self {
        Self {
            reply: Err(AssistantError::Generation(message.to_string())),
        }
    }
}

#[async_trait]
impl GenerativeProvider for StubGenerator {
    async fn generate(&self, _prompt: &str) -> AssistantResult<Option<String>> {
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(AssistantError::Generation(msg)) => Err(AssistantError::Generation(msg.clone())),
            Err(_) => unreachable!("stub only fails with Generation"),
        }
    }
}

struct EmptyProfiles;

#[async_trait]
impl ProfileDirectory for EmptyProfiles {
    async fn lookup(&self, _clinician_id: Uuid) -> AssistantResult<Option<ClinicianProfile>> {
        Ok(None)
    }
}

struct StubQueue;

#[async_trait]
impl TaskQueue for StubQueue {
    async fn enqueue(&self) -> AssistantResult<String> {
        Ok("task-42".to_string())
    }
}

fn sample_matches() -> Vec<PatientMatch> {
    vec![
        PatientMatch::new(Uuid::new_v4(), 0.91, Some(json!({"diagnosis": "Diabetes"}))),
        PatientMatch::new(Uuid::new_v4(), 0.83, Some(json!({"diagnosis": "Asthma"}))),
    ]
}

fn service_with(
    matches: Vec<PatientMatch>,
    generator: StubGenerator,
) -> Arc<AssistantService<StubRepository>> {
    let patients = Arc::new(PatientService::new(
        StubRepository { matches },
        Arc::new(FixedEmbeddings),
        CollectionSpec::new("patients".to_string(), DIMENSION),
    ));

    Arc::new(AssistantService::new(
        patients,
        Arc::new(generator),
        Arc::new(EmptyProfiles),
    ))
}

#[tokio::test]
async fn test_chat_missing_query_returns_400() {
    let app = handlers::router(service_with(vec![], StubGenerator::answering("x")));

    let response = app
        .oneshot(post_json("/chat", json!({"clinician_id": Uuid::new_v4()})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Missing required fields"));
}

#[tokio::test]
async fn test_chat_unknown_clinician_gets_placeholder_context() {
    let clinician_id = Uuid::new_v4();
    let app = handlers::router(service_with(
        sample_matches(),
        StubGenerator::answering("Here is what the records show."),
    ));

    let response = app
        .oneshot(post_json(
            "/chat",
            json!({"clinician_id": clinician_id, "query": "similar diabetics?"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["response"], "Here is what the records show.");
    assert_eq!(body["context"]["clinician_id"], json!(clinician_id));
    assert_eq!(body["context"]["specialization"], "general practice");
}

#[tokio::test]
async fn test_search_composes_full_answer() {
    let clinician_id = Uuid::new_v4();
    let app = handlers::router(service_with(
        sample_matches(),
        StubGenerator::answering("Two related records found."),
    ));

    let response = app
        .oneshot(post_json(
            "/search",
            json!({
                "clinician_id": clinician_id,
                "query": "similar diabetics?",
                "score_threshold": 0.5
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["query"], "similar diabetics?");
    assert_eq!(body["answer"], "Two related records found.");
    assert_eq!(body["matches"].as_array().unwrap().len(), 2);
    assert_eq!(body["profile"]["clinician_id"], json!(clinician_id));
}

#[tokio::test]
async fn test_generation_failure_returns_500_with_error_text() {
    let app = handlers::router(service_with(
        sample_matches(),
        StubGenerator::failing("quota exceeded"),
    ));

    let response = app
        .oneshot(post_json(
            "/search",
            json!({"clinician_id": Uuid::new_v4(), "query": "q"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response.into_body()).await;
    assert!(body["message"].as_str().unwrap().contains("quota exceeded"));
    // No partial payload alongside the error
    assert!(body.get("answer").is_none());
    assert!(body.get("matches").is_none());
}

#[tokio::test]
async fn test_generate_summary_returns_text() {
    let app = handlers::router(service_with(
        vec![],
        StubGenerator::answering("A concise history."),
    ));

    let response = app
        .oneshot(post_json(
            "/generate_summary",
            json!({"data": {"notes": "long patient history"}}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["summary"], "A concise history.");
}

#[tokio::test]
async fn test_generate_summary_missing_data_returns_400() {
    let app = handlers::router(service_with(vec![], StubGenerator::answering("x")));

    let response = app
        .oneshot(post_json("/generate_summary", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert!(body["message"].as_str().unwrap().contains("Missing data"));
}

#[tokio::test]
async fn test_generate_summary_empty_result_falls_back() {
    let app = handlers::router(service_with(vec![], StubGenerator::empty()));

    let response = app
        .oneshot(post_json("/generate_summary", json!({"data": "notes"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["summary"], FALLBACK_SUMMARY);
}

#[tokio::test]
async fn test_schedule_task_without_queue_returns_500() {
    let app = handlers::router(service_with(vec![], StubGenerator::answering("x")));

    let response = app
        .oneshot(post_json("/schedule_task", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response.into_body()).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("No task queue configured"));
}

#[tokio::test]
async fn test_schedule_task_with_queue_returns_task_name() {
    let patients = Arc::new(PatientService::new(
        StubRepository::default(),
        Arc::new(FixedEmbeddings),
        CollectionSpec::new("patients".to_string(), DIMENSION),
    ));

    let service = Arc::new(
        AssistantService::new(
            patients,
            Arc::new(StubGenerator::answering("x")),
            Arc::new(EmptyProfiles),
        )
        .with_task_queue(Arc::new(StubQueue)),
    );

    let app = handlers::router(service);

    let response = app
        .oneshot(post_json("/schedule_task", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Task scheduled successfully");
    assert_eq!(body["task_name"], "task-42");
}
