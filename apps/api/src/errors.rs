use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::requester::AnalysisError;
use crate::models::profile::ProfileError;
use crate::reports::store::StoreError;

pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate career analysis. Please try again.";
pub const REPORT_NOT_FOUND_MESSAGE: &str = "Report not found";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// User-facing messages are deliberately flat; the detail carried by each
/// variant is logged, never returned.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing report and foreign-owned report both land here.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Invalid analysis shape: {0}")]
    InvalidShape(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidShape(_) => AppError::InvalidShape(err.to_string()),
            AnalysisError::Generation(_) | AnalysisError::MalformedJson(_) => {
                AppError::Generation(err.to_string())
            }
        }
    }
}

/// Unreadable request bodies get the same envelope as any other bad input.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<ProfileError> for AppError {
    fn from(err: ProfileError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl AppError {
    /// Stable machine-readable code, also used by the view layer.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Generation(_) => "GENERATION_FAILED",
            AppError::InvalidShape(_) => "INVALID_ANALYSIS_SHAPE",
            AppError::Store(_) => "STORE_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication required".to_string(),
            ),
            AppError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                (StatusCode::BAD_GATEWAY, GENERATION_FAILED_MESSAGE.to_string())
            }
            AppError::InvalidShape(msg) => {
                tracing::error!("Analysis shape error: {msg}");
                (StatusCode::BAD_GATEWAY, GENERATION_FAILED_MESSAGE.to_string())
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A storage error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;

    #[test]
    fn test_analysis_errors_collapse_to_generation_except_shape() {
        let malformed = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let app: AppError = AnalysisError::MalformedJson(malformed).into();
        assert_eq!(app.code(), "GENERATION_FAILED");

        let app: AppError = AnalysisError::Generation(LlmError::EmptyContent {
            finish_reason: "SAFETY".to_string(),
        })
        .into();
        assert_eq!(app.code(), "GENERATION_FAILED");

        let shape = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let app: AppError = AnalysisError::InvalidShape(shape).into();
        assert_eq!(app.code(), "INVALID_ANALYSIS_SHAPE");
    }

    #[test]
    fn test_generation_failures_share_user_message() {
        let a = AppError::Generation("upstream 503".to_string()).into_response();
        let b = AppError::InvalidShape("missing field".to_string()).into_response();
        assert_eq!(a.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(b.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_profile_error_is_validation() {
        let app: AppError = ProfileError::MissingLocation.into();
        assert_eq!(app.code(), "VALIDATION_ERROR");
        assert_eq!(app.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
