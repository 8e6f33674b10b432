use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every value has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory holding the local JSON store.
    pub data_dir: String,
    /// Credential used when a refine request does not carry its own key.
    pub gemini_api_key: Option<String>,
    /// Pins the model instead of auto-selecting one per key.
    pub gemini_model: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: optional_env("GEMINI_MODEL"),
        })
    }
}

/// Unset and blank variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_env_treats_blank_as_absent() {
        std::env::set_var("RESUME_API_TEST_BLANK", "   ");
        std::env::set_var("RESUME_API_TEST_SET", " key-123 ");
        assert_eq!(optional_env("RESUME_API_TEST_BLANK"), None);
        assert_eq!(optional_env("RESUME_API_TEST_SET").as_deref(), Some("key-123"));
        assert_eq!(optional_env("RESUME_API_TEST_UNSET_VARIABLE"), None);
    }
}
