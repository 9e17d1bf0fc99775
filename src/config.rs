use config::{Config, ConfigError, Environment, File};
use log::{info, warn};
use serde::Deserialize;
use std::path::Path;

/// Prefix of environment overrides, e.g. `MEALPLAN__AI__MODEL`
pub const ENV_PREFIX: &str = "MEALPLAN";

/// Household preferences and generator settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Meal themes, in the order they should be suggested
    #[serde(default = "default_themes")]
    pub themes: Vec<String>,
    /// Age of the youngest eater, used for the baby tips
    #[serde(default = "default_baby_age")]
    pub baby_age: String,
    /// Upper bound on preparation time (`null` means no limit)
    #[serde(default = "default_max_prep_time")]
    pub max_prep_time: Option<String>,
    /// Free-form allergy list (`null` means none to report)
    #[serde(default = "default_allergies")]
    pub allergies: Option<String>,
    /// Text-generation provider settings
    #[serde(default)]
    pub ai: AiConfig,
    /// Where the weekly deals come from
    #[serde(default)]
    pub deals: DealsConfig,
}

/// Configuration for the deal feed
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DealsConfig {
    /// JSON feed URL; the built-in seed table when absent
    pub url: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Configuration for the text-generation provider
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AiConfig {
    /// Provider name ("google", "openai" or "anthropic")
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Whether generation is enabled at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier, provider default when absent
    pub model: Option<String>,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key; resolved from the environment by `with_env_credentials` when unset
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            themes: default_themes(),
            baby_age: default_baby_age(),
            max_prep_time: default_max_prep_time(),
            allergies: default_allergies(),
            ai: AiConfig::default(),
            deals: DealsConfig::default(),
        }
    }
}

impl Default for DealsConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout: default_timeout(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            enabled: default_enabled(),
            model: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
            timeout: default_timeout(),
        }
    }
}

impl AiConfig {
    /// Model to request, falling back to the provider's usual default
    pub fn model_name(&self) -> &str {
        match self.model.as_deref() {
            Some(model) if !model.trim().is_empty() => model,
            _ => match self.provider.as_str() {
                "openai" => "gpt-4o-mini",
                "anthropic" => "claude-3-5-haiku-latest",
                _ => "gemini-1.5-flash",
            },
        }
    }

    /// Fill in `api_key` from the provider's environment variable.
    ///
    /// Called once at startup so providers never read the environment
    /// themselves. A key already present in the file wins.
    pub fn with_env_credentials(mut self) -> Self {
        if self.api_key.is_none() {
            self.api_key = credential_env_vars(&self.provider)
                .iter()
                .find_map(|var| std::env::var(var).ok().filter(|key| !key.trim().is_empty()));
        }
        self
    }
}

/// Environment variables holding the credential of each provider, by priority
pub fn credential_env_vars(provider: &str) -> &'static [&'static str] {
    match provider {
        "google" => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
        "openai" => &["OPENAI_API_KEY"],
        "anthropic" => &["ANTHROPIC_API_KEY"],
        _ => &[],
    }
}

/// Why a loader handed back its built-in default
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultReason {
    /// The source does not exist
    Missing,
    /// The source exists but could not be read or parsed
    Malformed(String),
}

/// Outcome of loading an input that must never abort the run
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<T> {
    Loaded(T),
    Defaulted { value: T, reason: DefaultReason },
}

impl<T> LoadOutcome<T> {
    pub fn value(&self) -> &T {
        match self {
            LoadOutcome::Loaded(value) => value,
            LoadOutcome::Defaulted { value, .. } => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            LoadOutcome::Loaded(value) => value,
            LoadOutcome::Defaulted { value, .. } => value,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, LoadOutcome::Defaulted { .. })
    }

    pub fn reason(&self) -> Option<&DefaultReason> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Defaulted { reason, .. } => Some(reason),
        }
    }

    /// Log how the value was obtained and unwrap it
    pub fn into_logged(self, source: &Path) -> T {
        match &self {
            LoadOutcome::Loaded(_) => info!("Loaded {}", source.display()),
            LoadOutcome::Defaulted {
                reason: DefaultReason::Missing,
                ..
            } => info!("{} not found, using defaults", source.display()),
            LoadOutcome::Defaulted {
                reason: DefaultReason::Malformed(e),
                ..
            } => warn!("Ignoring malformed {}: {}", source.display(), e),
        }
        self.into_inner()
    }
}

// Default value functions
fn default_themes() -> Vec<String> {
    ["Québécois", "Mexicain", "Thaï", "BBQ"]
        .iter()
        .map(|theme| theme.to_string())
        .collect()
}

fn default_baby_age() -> String {
    "1 an".to_string()
}

fn default_max_prep_time() -> Option<String> {
    Some("30 min".to_string())
}

fn default_allergies() -> Option<String> {
    Some("Aucune".to_string())
}

fn default_provider() -> String {
    "google".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout() -> u64 {
    30
}

/// Load the planner configuration.
///
/// The format follows the file extension (JSON or TOML). When the file
/// exists, environment variables with the `MEALPLAN__` prefix override
/// its values, using double underscore for nesting:
/// `MEALPLAN__AI__PROVIDER=openai`.
///
/// Never fails: a missing file or any read/parse error yields
/// `PlannerConfig::default()` together with the reason.
pub fn load_config(path: impl AsRef<Path>) -> LoadOutcome<PlannerConfig> {
    let path = path.as_ref();
    if !path.is_file() {
        return LoadOutcome::Defaulted {
            value: PlannerConfig::default(),
            reason: DefaultReason::Missing,
        };
    }

    match read_config(path) {
        Ok(config) => LoadOutcome::Loaded(config),
        Err(e) => LoadOutcome::Defaulted {
            value: PlannerConfig::default(),
            reason: DefaultReason::Malformed(e.to_string()),
        },
    }
}

fn read_config(path: &Path) -> Result<PlannerConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    settings.try_deserialize()
}
