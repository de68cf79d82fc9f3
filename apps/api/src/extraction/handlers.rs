//! Axum route handlers for the Extraction API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::extraction::normalize::SchemaDrift;
use crate::models::resume::ResumeRecord;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractionRequest {
    /// Raw biographical text. Missing or `null` means empty; no length or content checks.
    #[serde(default)]
    pub text: Option<String>,
}

impl ExtractionRequest {
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct NormalizedExtractionResponse {
    pub resume: ResumeRecord,
    pub drift: SchemaDrift,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/ai-agent
///
/// Returns the model's JSON object verbatim. Any failure, including an
/// unreadable request body, becomes the fixed 500 error body.
pub async fn handle_ai_agent(
    State(state): State<AppState>,
    request: Result<Json<ExtractionRequest>, JsonRejection>,
) -> Result<Json<Map<String, Value>>, AppError> {
    let Json(request) = request?;
    let cancel = state.shutdown.child_token();

    let record = state.extractor.extract(request.text(), &cancel).await?;

    Ok(Json(record))
}

/// POST /api/v1/resume/extract
///
/// Same single upstream call, but the result is normalized into a
/// fully-defaulted `ResumeRecord` with a report of what had to change.
pub async fn handle_extract_normalized(
    State(state): State<AppState>,
    request: Result<Json<ExtractionRequest>, JsonRejection>,
) -> Result<Json<NormalizedExtractionResponse>, AppError> {
    let Json(request) = request?;
    let cancel = state.shutdown.child_token();

    let (resume, drift) = state
        .extractor
        .extract_normalized(request.text(), &cancel)
        .await?;

    Ok(Json(NormalizedExtractionResponse { resume, drift }))
}
