mod anthropic;
mod factory;
mod google;
mod open_ai;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use google::GoogleProvider;
pub use open_ai::OpenAIProvider;

use crate::config::{credential_env_vars, AiConfig};
use crate::error::GenerationError;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

/// Text-generation capability: one prompt in, one free-form text out
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn provider_name(&self) -> &str;

    /// Send `prompt` once and return the raw model text
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Credential from the resolved configuration, or `Unavailable`
fn require_api_key(config: &AiConfig) -> Result<String, GenerationError> {
    config
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            let hint = match credential_env_vars(&config.provider) {
                [] => String::new(),
                vars => format!(" (set {})", vars.join(" or ")),
            };
            GenerationError::Unavailable(format!(
                "no API key configured for {}{}",
                config.provider, hint
            ))
        })
}

fn http_client(config: &AiConfig) -> Result<Client, GenerationError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()?)
}

/// Pass a 2xx response through; anything else becomes `InvalidResponse`
/// carrying the status and the API's error message (or the raw body).
async fn ensure_success(response: Response, api: &str) -> Result<Response, GenerationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|value| api_error_message(&value))
        .unwrap_or_else(|| body.trim().to_string());

    Err(GenerationError::InvalidResponse(format!(
        "{} request failed with status: {}: {}",
        api, status, detail
    )))
}

/// `{"error": {"message": ..}}` or `{"error": ".."}`
fn api_error_message(value: &Value) -> Option<String> {
    let error = value.get("error")?;
    error["message"]
        .as_str()
        .or_else(|| error.as_str())
        .map(String::from)
}

/// Strip a trailing slash so paths can be appended with `format!`
fn base_url(config: &AiConfig, default: &str) -> String {
    config
        .base_url
        .as_deref()
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::AiConfig;

    pub fn ai_config(provider: &str, base_url: Option<String>) -> AiConfig {
        AiConfig {
            provider: provider.to_string(),
            api_key: Some("test-key".to_string()),
            base_url,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_api_key_missing() {
        let config = AiConfig::default();
        let err = require_api_key(&config).unwrap_err();
        assert!(matches!(err, GenerationError::Unavailable(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_require_api_key_blank() {
        let config = AiConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(require_api_key(&config).is_err());
    }

    #[test]
    fn test_api_error_message() {
        let nested = serde_json::json!({"error": {"code": 429, "message": "Rate limited"}});
        assert_eq!(api_error_message(&nested).as_deref(), Some("Rate limited"));

        let flat = serde_json::json!({"error": "Invalid request"});
        assert_eq!(api_error_message(&flat).as_deref(), Some("Invalid request"));

        assert_eq!(api_error_message(&serde_json::json!({"ok": true})), None);
    }

    #[test]
    fn test_base_url_trims_slash() {
        let config = AiConfig {
            base_url: Some("http://localhost:8080/".to_string()),
            ..Default::default()
        };
        assert_eq!(base_url(&config, "https://x"), "http://localhost:8080");
        assert_eq!(base_url(&AiConfig::default(), "https://x"), "https://x");
    }
}
