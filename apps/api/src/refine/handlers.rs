//! Axum route handlers for the Refine API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ats::{compute_ats_report, AtsReport};
use crate::errors::AppError;
use crate::models::resume::ResumeDocument;
use crate::refine::refiner::{refine_resume, RefineError};
use crate::state::AppState;

pub const REFINED_MESSAGE: &str = "AI refined the resume. Review and adjust as needed.";

#[derive(Debug, Deserialize)]
pub struct RefineRequest {
    #[serde(default)]
    pub job_description: String,
    /// Overrides `GEMINI_API_KEY` for this request.
    pub api_key: Option<String>,
    /// Refines the stored resume when omitted.
    pub resume: Option<ResumeDocument>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineResponse {
    pub resume: ResumeDocument,
    pub ats_report: AtsReport,
    pub message: String,
}

/// POST /api/v1/refine
///
/// Runs the refine pipeline. A newer request supersedes one still in flight; the older
/// request gets a 409 and its result is never stored. Storing happens inside the
/// coordinated job, so a superseded request cannot write after the newer one. On success
/// the refined resume is re-scored against the same job description.
pub async fn handle_refine(
    State(state): State<AppState>,
    Json(request): Json<RefineRequest>,
) -> Result<Json<RefineResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(RefineError::MissingJobDescription.into());
    }

    let api_key = request
        .api_key
        .filter(|key| !key.trim().is_empty())
        .or_else(|| state.config.gemini_api_key.clone())
        .ok_or(RefineError::MissingApiKey)?;

    let resume = match request.resume {
        Some(resume) => resume,
        None => state.store.load_resume().await,
    };

    let refiner = state.refiner.clone();
    let store = state.store.clone();
    let job_description = request.job_description;
    let jd = job_description.clone();
    let refined = state
        .refine_jobs
        .run(async move {
            let refined = refine_resume(refiner.as_ref(), &api_key, &resume, &jd).await?;
            store.save_resume(&refined).await?;
            Ok::<_, RefineError>(refined)
        })
        .await?;

    let ats_report = compute_ats_report(&job_description, &refined);
    info!("Refine complete: new ats_score={}", ats_report.score);

    Ok(Json(RefineResponse {
        resume: refined,
        ats_report,
        message: REFINED_MESSAGE.to_string(),
    }))
}
