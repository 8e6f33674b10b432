//! Refine pipeline — rewrites a resume toward a job description through the model.
//!
//! `AppState` holds an `Arc<dyn Refiner>`; production uses `GeminiClient`, tests a stub.
//! Every run ends in exactly one outcome: a fully validated resume or a `RefineError`.
//! The caller's current resume is never touched here.

use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tracing::{info, warn};

use crate::ats::compute_ats_report;
use crate::llm_client::{GeminiClient, LlmError};
use crate::models::resume::ResumeDocument;
use crate::refine::extract::extract_json_from_text;
use crate::refine::prompts::build_ai_prompt;
use crate::refine::validation::resume_from_value;
use crate::storage::StoreError;

pub const INVALID_RESPONSE_MESSAGE: &str =
    "AI response was not valid resume JSON. Please try again or switch model.";

#[derive(Debug, Error)]
pub enum RefineError {
    #[error("Add a job description first to generate suggestions.")]
    MissingJobDescription,

    #[error("Add your Gemini API key to run AI refine.")]
    MissingApiKey,

    #[error("Unable to refine with AI: {0}")]
    Remote(#[from] LlmError),

    #[error("{}", INVALID_RESPONSE_MESSAGE)]
    NoJson,

    #[error("{}", INVALID_RESPONSE_MESSAGE)]
    InvalidShape(String),

    #[error("Superseded by a newer refine request.")]
    Superseded,

    #[error("Could not store the refined resume: {0}")]
    Store(#[from] StoreError),

    #[error("Refine task failed: {0}")]
    TaskFailed(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The remote text-completion seam. Implement this to swap backends without touching
/// the pipeline or handlers.
#[async_trait]
pub trait Refiner: Send + Sync {
    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl Refiner for GeminiClient {
    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, LlmError> {
        self.generate(api_key, prompt).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs one refinement: score → prompt → remote call → JSON recovery → strict validation.
pub async fn refine_resume(
    refiner: &dyn Refiner,
    api_key: &str,
    resume: &ResumeDocument,
    job_description: &str,
) -> Result<ResumeDocument, RefineError> {
    if job_description.trim().is_empty() {
        return Err(RefineError::MissingJobDescription);
    }
    if api_key.trim().is_empty() {
        return Err(RefineError::MissingApiKey);
    }

    let report = compute_ats_report(job_description, resume);
    info!(
        "Refining resume: ats_score={}, missing_keywords={}",
        report.score,
        report.missing_keywords.len()
    );

    let prompt = build_ai_prompt(resume, job_description, &report.missing_keywords);
    let response = refiner.complete(api_key, &prompt).await?;

    let candidate = extract_json_from_text(&response).ok_or_else(|| {
        warn!("Refine response contained no JSON ({} chars)", response.len());
        RefineError::NoJson
    })?;

    let value: Value = serde_json::from_str(candidate).map_err(|_| RefineError::NoJson)?;
    resume_from_value(value).map_err(|reason| {
        warn!("Refine response failed validation: {reason}");
        RefineError::InvalidShape(reason)
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Supersession
// ────────────────────────────────────────────────────────────────────────────

/// Runs refine jobs so that a newer job cancels any older one still in flight.
#[derive(Default)]
pub struct RefineCoordinator {
    pending: Mutex<Option<AbortHandle>>,
}

impl RefineCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `job`, aborting the previously pending job. An aborted job resolves to
    /// `RefineError::Superseded`. Side effects that must not outlive supersession, such as
    /// storing the result, belong inside `job`.
    pub async fn run<F, T>(&self, job: F) -> Result<T, RefineError>
    where
        F: Future<Output = Result<T, RefineError>> + Send + 'static,
        T: Send + 'static,
    {
        let handle = tokio::spawn(job);

        if let Some(previous) = self.pending.lock().await.replace(handle.abort_handle()) {
            previous.abort();
        }

        match handle.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => {
                info!("Refine job superseded by a newer request");
                Err(RefineError::Superseded)
            }
            Err(e) => Err(RefineError::TaskFailed(e.to_string())),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
