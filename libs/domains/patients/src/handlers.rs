//! REST handlers for patient-record operations

use axum::{extract::State, routing::post, Json, Router};
use axum_helpers::errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::error::PatientResult;
use crate::models::{InsertPatient, PatientMatch};
use crate::repository::VectorRepository;
use crate::service::PatientService;

/// OpenAPI documentation for the patient-record endpoints
#[derive(OpenApi)]
#[openapi(
    paths(insert_patient, search_similar_patients),
    components(
        schemas(
            InsertPatientRequest,
            InsertPatientResponse,
            SearchPatientsRequest,
            SearchPatientsResponse,
            PatientMatch
        ),
        responses(BadRequestValidationResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "patients", description = "Patient record ingestion and similarity search")
    )
)]
pub struct PatientsApiDoc;

// ===== Request/Response DTOs =====

/// Request to insert a patient record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InsertPatientRequest {
    pub patient_id: Option<Uuid>,
    pub text: Option<String>,
    pub attributes: Option<serde_json::Value>,
}

/// Response for a successful insert
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InsertPatientResponse {
    pub message: String,
}

/// Request to search for similar patients
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchPatientsRequest {
    pub text: Option<String>,
    #[serde(default)]
    pub score_threshold: Option<f32>,
}

/// Ranked matches for a search request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchPatientsResponse {
    pub matches: Vec<PatientMatch>,
}

/// Create the patient router with all HTTP endpoints
pub fn router<R: VectorRepository + 'static>(service: Arc<PatientService<R>>) -> Router {
    Router::new()
        .route("/insert_patient", post(insert_patient))
        .route("/search_similar_patients", post(search_similar_patients))
        .with_state(service)
}

/// Insert a patient record
#[utoipa::path(
    post,
    path = "/insert_patient",
    tag = "patients",
    request_body = InsertPatientRequest,
    responses(
        (status = 200, description = "Patient record inserted", body = InsertPatientResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn insert_patient<R: VectorRepository>(
    State(service): State<Arc<PatientService<R>>>,
    Json(request): Json<InsertPatientRequest>,
) -> PatientResult<Json<InsertPatientResponse>> {
    service
        .insert_patient(InsertPatient {
            patient_id: request.patient_id,
            text: request.text,
            attributes: request.attributes,
        })
        .await?;

    Ok(Json(InsertPatientResponse {
        message: "Patient record inserted successfully".to_string(),
    }))
}

/// Search for patients similar to the given text
#[utoipa::path(
    post,
    path = "/search_similar_patients",
    tag = "patients",
    request_body = SearchPatientsRequest,
    responses(
        (status = 200, description = "Ranked similar patients", body = SearchPatientsResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_similar_patients<R: VectorRepository>(
    State(service): State<Arc<PatientService<R>>>,
    Json(request): Json<SearchPatientsRequest>,
) -> PatientResult<Json<SearchPatientsResponse>> {
    let matches = service
        .search_similar(request.text, request.score_threshold)
        .await?;

    Ok(Json(SearchPatientsResponse { matches }))
}
