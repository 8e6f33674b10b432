use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::refine::refiner::RefineError;
use crate::storage::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Refine error: {0}")]
    Refine(#[from] RefineError),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Refine(e) => {
                let (status, code) = match e {
                    RefineError::MissingJobDescription | RefineError::MissingApiKey => {
                        (StatusCode::BAD_REQUEST, "REFINE_INPUT_MISSING")
                    }
                    RefineError::NoJson | RefineError::InvalidShape(_) => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "REFINE_INVALID_RESPONSE")
                    }
                    RefineError::Superseded => (StatusCode::CONFLICT, "REFINE_SUPERSEDED"),
                    RefineError::Remote(LlmError::Api { status: 401 | 403, .. }) => {
                        (StatusCode::UNAUTHORIZED, "LLM_UNAUTHORIZED")
                    }
                    RefineError::Remote(_) => (StatusCode::BAD_GATEWAY, "LLM_ERROR"),
                    RefineError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
                    RefineError::TaskFailed(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
                    }
                };
                if status.is_server_error() {
                    tracing::error!("Refine failed: {e}");
                } else {
                    tracing::warn!("Refine rejected: {e}");
                }
                let message = match e {
                    RefineError::Store(_) => "A storage error occurred".to_string(),
                    RefineError::TaskFailed(_) => "An internal server error occurred".to_string(),
                    _ => e.to_string(),
                };
                (status, code, message)
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let (status, code, message) = AppError::Validation("bad".to_string()).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
        assert_eq!(message, "bad");
    }

    #[test]
    fn test_invalid_model_output_is_advisory() {
        let (status, _, message) =
            AppError::from(RefineError::InvalidShape("Missing \"header\" object.".into())).parts();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            message,
            "AI response was not valid resume JSON. Please try again or switch model."
        );
    }

    #[test]
    fn test_rejected_api_key_maps_to_unauthorized() {
        let err = RefineError::Remote(LlmError::Api {
            status: 403,
            message: "API key not valid".to_string(),
        });
        let (status, code, _) = AppError::from(err).parts();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(code, "LLM_UNAUTHORIZED");
    }

    #[test]
    fn test_other_remote_failures_are_bad_gateway() {
        let (status, _, message) = AppError::from(RefineError::Remote(LlmError::EmptyContent)).parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(message.contains("empty content"));
    }

    #[test]
    fn test_refine_storage_failure_hides_details() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = RefineError::Store(StoreError::Io {
            path: "/srv/data/resume.json".into(),
            source,
        });
        let (status, code, message) = AppError::from(err).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "STORAGE_ERROR");
        assert_eq!(message, "A storage error occurred");
    }

    #[test]
    fn test_superseded_is_conflict() {
        let (status, _, _) = AppError::from(RefineError::Superseded).parts();
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
