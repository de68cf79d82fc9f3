use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::extractor::ExtractionError;

/// The only failure message callers ever see.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant collapses to HTTP 500 with `{"error": "Something went wrong."}`;
/// the variant and its detail only reach the logs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Malformed request body: {0}")]
    MalformedRequest(#[from] JsonRejection),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MalformedRequest(_) => "malformed_request",
            AppError::Extraction(e) => e.kind().as_str(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(kind = self.kind(), "{self}");

        let body = Json(json!({ "error": GENERIC_ERROR_MESSAGE }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_every_extraction_error_maps_to_fixed_body() {
        let errors = vec![
            ExtractionError::Transport(LlmError::Api {
                status: 429,
                message: "quota".to_string(),
            }),
            ExtractionError::Timeout(std::time::Duration::from_secs(1)),
            ExtractionError::Cancelled,
            ExtractionError::Parse(serde_json::from_str::<serde_json::Value>("nope").unwrap_err()),
            ExtractionError::NotAnObject("array"),
        ];

        for error in errors {
            let response = AppError::from(error).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body_of(response).await, json!({"error": "Something went wrong."}));
        }
    }

    #[test]
    fn test_kind_passes_through_extraction_kind() {
        let err = AppError::from(ExtractionError::Cancelled);
        assert_eq!(err.kind(), "cancelled");
    }
}
