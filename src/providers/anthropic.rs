use crate::config::AiConfig;
use crate::error::GenerationError;
use crate::providers::{base_url, ensure_success, http_client, require_api_key, TextGenerator};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider from configuration
    pub fn new(config: &AiConfig) -> Result<Self, GenerationError> {
        Ok(AnthropicProvider {
            client: http_client(config)?,
            api_key: require_api_key(config)?,
            base_url: base_url(config, "https://api.anthropic.com"),
            model: config.model_name().to_string(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl TextGenerator for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "temperature": self.temperature,
                "messages": [
                    {
                        "role": "user",
                        "content": prompt
                    }
                ]
            }))
            .send()
            .await?;
        let response = ensure_success(response, "Anthropic API").await?;

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);

        let text = response_body["content"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                GenerationError::InvalidResponse(
                    "Failed to extract content from Anthropic response".to_string(),
                )
            })?
            .to_string();

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::test_support::ai_config;
    use mockito::Server;

    #[tokio::test]
    async fn test_generate() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "test-key")
            .match_header("anthropic-version", "2023-06-01")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content": [{"type": "text", "text": "[]"}]}"#)
            .create_async()
            .await;

        let provider =
            AnthropicProvider::new(&ai_config("anthropic", Some(server.url()))).unwrap();
        assert_eq!(provider.generate("prompt").await.unwrap(), "[]");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_server_error_page() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .with_status(500)
            .with_header("content-type", "text/html")
            .with_body("<html><body>Internal Server Error</body></html>")
            .create_async()
            .await;

        let provider =
            AnthropicProvider::new(&ai_config("anthropic", Some(server.url()))).unwrap();
        let err = provider.generate("prompt").await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponse(_)));
        assert!(err.to_string().contains("500"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_overloaded() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/messages")
            .with_status(529)
            .with_header("content-type", "application/json")
            .with_body(r#"{"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}}"#)
            .create_async()
            .await;

        let provider =
            AnthropicProvider::new(&ai_config("anthropic", Some(server.url()))).unwrap();
        let err = provider.generate("prompt").await.unwrap_err();
        assert!(err.to_string().contains("Overloaded"));
    }

    #[test]
    fn test_provider_name() {
        let provider = AnthropicProvider::new(&ai_config("anthropic", None)).unwrap();
        assert_eq!(provider.provider_name(), "anthropic");
    }
}
