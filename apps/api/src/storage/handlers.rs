//! Axum route handlers for the stored resume and builder preferences.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::builder_config::BuilderConfig;
use crate::models::resume::ResumeDocument;
use crate::refine::validation::parse_resume_json;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeResponse {
    pub resume: ResumeDocument,
    pub has_content: bool,
}

impl From<ResumeDocument> for ResumeResponse {
    fn from(resume: ResumeDocument) -> Self {
        let has_content = resume.has_content();
        Self {
            resume,
            has_content,
        }
    }
}

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeResponse> {
    Json(state.store.load_resume().await.into())
}

/// PUT /api/v1/resume
///
/// Takes the raw JSON text from the editor. The first violated shape rule is returned as a
/// 400 and nothing is stored.
pub async fn handle_put_resume(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ResumeResponse>, AppError> {
    let resume = parse_resume_json(&body).map_err(AppError::Validation)?;
    state.store.save_resume(&resume).await?;
    info!("Stored resume for {}", resume.header.name);
    Ok(Json(resume.into()))
}

/// DELETE /api/v1/resume
///
/// Clears the stored resume and preferences; later reads fall back to the sample resume.
pub async fn handle_reset(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.reset().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/config
pub async fn handle_get_config(State(state): State<AppState>) -> Json<BuilderConfig> {
    Json(state.store.load_config().await)
}

/// PUT /api/v1/config
///
/// Missing fields take their defaults.
pub async fn handle_put_config(
    State(state): State<AppState>,
    Json(config): Json<BuilderConfig>,
) -> Result<Json<BuilderConfig>, AppError> {
    state.store.save_config(&config).await?;
    Ok(Json(config))
}
