//! REST handlers for summaries, conversational search, and task scheduling

use axum::{extract::State, routing::post, Json, Router};
use axum_helpers::errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use domain_patients::{PatientMatch, VectorRepository};

use crate::error::AssistantResult;
use crate::models::{AssistantAnswer, ChatReply, ClinicianProfile, ProfilePreferences, ScheduledTask};
use crate::service::AssistantService;

/// OpenAPI documentation for the assistant endpoints
#[derive(OpenApi)]
#[openapi(
    paths(generate_summary, search, chat, schedule_task),
    components(
        schemas(
            GenerateSummaryRequest,
            GenerateSummaryResponse,
            AssistantSearchRequest,
            AssistantAnswer,
            ChatRequest,
            ChatReply,
            ClinicianProfile,
            ProfilePreferences,
            PatientMatch,
            ScheduledTask
        ),
        responses(BadRequestValidationResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "assistant", description = "Summaries and conversational answers over patient records")
    )
)]
pub struct AssistantApiDoc;

// ===== Request/Response DTOs =====

/// Request to summarize arbitrary data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateSummaryRequest {
    pub data: Option<serde_json::Value>,
}

/// Generated summary text
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateSummaryResponse {
    pub summary: String,
}

/// Request for the full conversational endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssistantSearchRequest {
    pub clinician_id: Option<Uuid>,
    pub query: Option<String>,
    #[serde(default)]
    pub score_threshold: Option<f32>,
}

/// Request for the chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub clinician_id: Option<Uuid>,
    pub query: Option<String>,
}

/// Create the assistant router with all HTTP endpoints
pub fn router<R: VectorRepository + 'static>(service: Arc<AssistantService<R>>) -> Router {
    Router::new()
        .route("/generate_summary", post(generate_summary))
        .route("/search", post(search))
        .route("/chat", post(chat))
        .route("/schedule_task", post(schedule_task))
        .with_state(service)
}

/// Generate a summary of the submitted data
#[utoipa::path(
    post,
    path = "/generate_summary",
    tag = "assistant",
    request_body = GenerateSummaryRequest,
    responses(
        (status = 200, description = "Generated summary", body = GenerateSummaryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn generate_summary<R: VectorRepository>(
    State(service): State<Arc<AssistantService<R>>>,
    Json(request): Json<GenerateSummaryRequest>,
) -> AssistantResult<Json<GenerateSummaryResponse>> {
    let summary = service.summarize(request.data).await?;
    Ok(Json(GenerateSummaryResponse { summary }))
}

/// Answer a clinician's question using related patient records
#[utoipa::path(
    post,
    path = "/search",
    tag = "assistant",
    request_body = AssistantSearchRequest,
    responses(
        (status = 200, description = "Composed answer with matches and profile", body = AssistantAnswer),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search<R: VectorRepository>(
    State(service): State<Arc<AssistantService<R>>>,
    Json(request): Json<AssistantSearchRequest>,
) -> AssistantResult<Json<AssistantAnswer>> {
    let answer = service
        .answer(request.clinician_id, request.query, request.score_threshold)
        .await?;
    Ok(Json(answer))
}

/// Chat with the assistant about patient records
#[utoipa::path(
    post,
    path = "/chat",
    tag = "assistant",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Chat reply with the clinician context", body = ChatReply),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn chat<R: VectorRepository>(
    State(service): State<Arc<AssistantService<R>>>,
    Json(request): Json<ChatRequest>,
) -> AssistantResult<Json<ChatReply>> {
    let reply = service.chat(request.clinician_id, request.query).await?;
    Ok(Json(reply))
}

/// Enqueue a follow-up task
#[utoipa::path(
    post,
    path = "/schedule_task",
    tag = "assistant",
    responses(
        (status = 200, description = "Task scheduled", body = ScheduledTask),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn schedule_task<R: VectorRepository>(
    State(service): State<Arc<AssistantService<R>>>,
) -> AssistantResult<Json<ScheduledTask>> {
    let scheduled = service.schedule_follow_up().await?;
    Ok(Json(scheduled))
}
