use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_patients::PatientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Profile error: {0}")]
    Profile(String),

    #[error("Task queue error: {0}")]
    Queue(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Patients(#[from] PatientError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AssistantResult<T> = Result<T, AssistantError>;

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        AssistantError::Generation(err.to_string())
    }
}

impl From<serde_json::Error> for AssistantError {
    fn from(err: serde_json::Error) -> Self {
        AssistantError::Internal(format!("JSON error: {}", err))
    }
}

/// Convert AssistantError to AppError for standardized HTTP error responses.
///
/// Validation failures stay client errors (400) even when they originate
/// in the patients pipeline; everything else surfaces as 500 with the
/// underlying error text.
impl From<AssistantError> for AppError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::Validation(msg) => AppError::BadRequest(msg),
            AssistantError::Generation(msg) => {
                AppError::InternalServerError(format!("Generation error: {}", msg))
            }
            AssistantError::Profile(msg) => {
                AppError::InternalServerError(format!("Profile error: {}", msg))
            }
            AssistantError::Queue(msg) => {
                AppError::InternalServerError(format!("Task queue error: {}", msg))
            }
            AssistantError::Config(msg) => {
                AppError::InternalServerError(format!("Config error: {}", msg))
            }
            AssistantError::Patients(inner) => inner.into(),
            AssistantError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for AssistantError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_validation_maps_to_400() {
        let response =
            AssistantError::Validation("Missing required fields".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_nested_patient_validation_stays_400() {
        let err: AssistantError = PatientError::Validation("Missing text".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_generation_maps_to_500() {
        let response = AssistantError::Generation("quota exceeded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
