use crate::config::AiConfig;
use crate::error::GenerationError;
use crate::providers::{base_url, ensure_success, http_client, require_api_key, TextGenerator};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(config: &AiConfig) -> Result<Self, GenerationError> {
        Ok(OpenAIProvider {
            client: http_client(config)?,
            api_key: require_api_key(config)?,
            base_url: base_url(config, "https://api.openai.com"),
            model: config.model_name().to_string(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "user", "content": prompt}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;
        let response = ensure_success(response, "OpenAI API").await?;

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);
        let text = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                GenerationError::InvalidResponse(
                    "Failed to extract content from response".to_string(),
                )
            })?
            .to_string();

        Ok(text)
    }
}
