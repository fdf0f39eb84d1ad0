use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatientError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Qdrant error: {0}")]
    Qdrant(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type PatientResult<T> = Result<T, PatientError>;

impl From<qdrant_client::QdrantError> for PatientError {
    fn from(err: qdrant_client::QdrantError) -> Self {
        PatientError::Qdrant(err.to_string())
    }
}

impl From<reqwest::Error> for PatientError {
    fn from(err: reqwest::Error) -> Self {
        PatientError::Embedding(err.to_string())
    }
}

impl From<serde_json::Error> for PatientError {
    fn from(err: serde_json::Error) -> Self {
        PatientError::Internal(format!("JSON error: {}", err))
    }
}

/// Convert PatientError to AppError for standardized HTTP error responses.
///
/// Validation failures are client errors (400); everything else is an
/// upstream or internal failure surfaced as 500 with the error text.
impl From<PatientError> for AppError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::Validation(msg) => AppError::BadRequest(msg),
            PatientError::Qdrant(msg) => {
                AppError::InternalServerError(format!("Qdrant error: {}", msg))
            }
            PatientError::Embedding(msg) => {
                AppError::InternalServerError(format!("Embedding error: {}", msg))
            }
            PatientError::Config(msg) => {
                AppError::InternalServerError(format!("Config error: {}", msg))
            }
            PatientError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for PatientError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
