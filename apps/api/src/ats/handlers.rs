//! Axum route handlers for the ATS API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::ats::{compute_ats_report, extract_resume_keywords, AtsReport};
use crate::models::resume::ResumeDocument;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AtsReportRequest {
    #[serde(default)]
    pub job_description: String,
    /// Scores the stored resume when omitted.
    pub resume: Option<ResumeDocument>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub resume: Option<ResumeDocument>,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/report
///
/// An empty job description is not an error; it yields the zero report with guidance text.
pub async fn handle_ats_report(
    State(state): State<AppState>,
    Json(request): Json<AtsReportRequest>,
) -> Json<AtsReport> {
    let resume = match request.resume {
        Some(resume) => resume,
        None => state.store.load_resume().await,
    };

    Json(compute_ats_report(&request.job_description, &resume))
}

/// POST /api/v1/ats/keywords
pub async fn handle_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Json<KeywordsResponse> {
    let resume = match request.resume {
        Some(resume) => resume,
        None => state.store.load_resume().await,
    };

    Json(KeywordsResponse {
        keywords: extract_resume_keywords(&resume).into_vec(),
    })
}
