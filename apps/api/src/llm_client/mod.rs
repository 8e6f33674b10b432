//! LLM Client — the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! The refine pipeline reaches this client only through the `Refiner` trait.
//!
//! Model: `GEMINI_MODEL` when configured, otherwise auto-selected per API key
//! (first generative "flash" model, else the first generative model).

use std::sync::Arc;

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const GENERATE_METHOD: &str = "generateContent";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("No models available for this API key")]
    NoModelAvailable,
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageMetadata {
    pub prompt_token_count: u32,
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate, trimmed. `None` when blank.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Model selection
// ────────────────────────────────────────────────────────────────────────────

/// Result of model auto-selection: the chosen model plus every generative option.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSelection {
    pub selected: String,
    pub options: Vec<String>,
}

/// Picks a model from a listing. Flash models are preferred to keep quota usage low.
///
/// Order: first generative model whose name contains "flash", then the first generative
/// model, then the first listed model of any kind.
pub fn select_model(models: &[ModelInfo]) -> Option<ModelSelection> {
    let generative: Vec<&ModelInfo> = models
        .iter()
        .filter(|m| m.supported_generation_methods.iter().any(|g| g == GENERATE_METHOD))
        .collect();

    let selected = generative
        .iter()
        .find(|m| m.name.to_lowercase().contains("flash"))
        .or_else(|| generative.first())
        .map(|m| m.name.clone())
        .or_else(|| models.first().map(|m| m.name.clone()))?;

    Some(ModelSelection {
        selected,
        options: generative.iter().map(|m| m.name.clone()).collect(),
    })
}

/// Gemini endpoints address models as `models/<id>`; accept bare ids from config.
fn model_path(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single Gemini client. Cheap to clone; the resolved-model cache is shared.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    pinned_model: Option<String>,
    /// (api_key, model) from the last successful auto-selection.
    resolved: Arc<Mutex<Option<(String, String)>>>,
}

impl GeminiClient {
    pub fn new(pinned_model: Option<String>) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            base_url: GEMINI_API_BASE.to_string(),
            pinned_model,
            resolved: Arc::new(Mutex::new(None)),
        })
    }

    /// Sends a request, retrying on 429 (rate limit) and 5xx with exponential backoff.
    /// Returns the raw response body on success.
    async fn send(&self, build: impl Fn() -> RequestBuilder) -> Result<String, LlmError> {
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Gemini call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match build().send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Gemini API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            let body = response.text().await?;

            if !status.is_success() {
                let message = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            return Ok(body);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Lists the models visible to `api_key`.
    pub async fn list_models(&self, api_key: &str) -> Result<Vec<ModelInfo>, LlmError> {
        let url = format!("{}/models", self.base_url);
        let body = self
            .send(|| self.client.get(&url).query(&[("key", api_key.trim())]))
            .await?;
        let list: ModelList = serde_json::from_str(&body)?;
        Ok(list.models)
    }

    /// Returns the model to use for `api_key`: pinned, cached, or freshly selected.
    pub async fn resolve_model(&self, api_key: &str) -> Result<String, LlmError> {
        if let Some(model) = &self.pinned_model {
            return Ok(model.clone());
        }

        let mut resolved = self.resolved.lock().await;
        if let Some((key, model)) = resolved.as_ref() {
            if key == api_key {
                return Ok(model.clone());
            }
        }

        let models = self.list_models(api_key).await?;
        let selection = select_model(&models).ok_or(LlmError::NoModelAvailable)?;
        info!(
            "Selected Gemini model {} ({} generative options)",
            selection.selected,
            selection.options.len()
        );

        *resolved = Some((api_key.to_string(), selection.selected.clone()));
        Ok(selection.selected)
    }

    /// Sends `prompt` as a single user turn and returns the trimmed response text.
    pub async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, LlmError> {
        let model = self.resolve_model(api_key).await?;
        let url = format!(
            "{}/{}:{}",
            self.base_url,
            model_path(&model),
            GENERATE_METHOD
        );
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let body = self
            .send(|| {
                self.client
                    .post(&url)
                    .query(&[("key", api_key.trim())])
                    .json(&request_body)
            })
            .await?;

        let response: GenerateContentResponse = serde_json::from_str(&body)?;
        if let Some(usage) = &response.usage_metadata {
            debug!(
                "Gemini call succeeded: model={}, prompt_tokens={}, output_tokens={}",
                model, usage.prompt_token_count, usage.candidates_token_count
            );
        }

        response.text().ok_or(LlmError::EmptyContent)
    }
}
