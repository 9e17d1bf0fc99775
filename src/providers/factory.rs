use crate::config::AiConfig;
use crate::error::GenerationError;
use crate::providers::{AnthropicProvider, GoogleProvider, OpenAIProvider, TextGenerator};

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the configured provider.
    ///
    /// `config` must already carry its credential (see
    /// `AiConfig::with_env_credentials`); a missing key, an unknown
    /// provider or a disabled configuration are all `Unavailable`.
    pub fn create(config: &AiConfig) -> Result<Box<dyn TextGenerator>, GenerationError> {
        if !config.enabled {
            return Err(GenerationError::Unavailable(
                "text generation is disabled in configuration".to_string(),
            ));
        }

        match config.provider.as_str() {
            "google" => Ok(Box::new(GoogleProvider::new(config)?)),
            "openai" => Ok(Box::new(OpenAIProvider::new(config)?)),
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config)?)),
            other => Err(GenerationError::Unavailable(format!(
                "Unknown provider: {}",
                other
            ))),
        }
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["google", "openai", "anthropic"]
    }
}
