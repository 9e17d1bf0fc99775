mod parse;
mod prompt;

pub use parse::{parse_recipes, sanitize_response};
pub use prompt::{build_recipe_prompt, MEAL_COUNT, RECIPE_PROMPT};

use crate::config::{AiConfig, PlannerConfig};
use crate::error::GenerationError;
use crate::providers::{ProviderFactory, TextGenerator};
use log::{debug, info, warn};

/// One meal suggestion as returned by the text generator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeRecord {
    pub title: String,
    pub desc: String,
    pub baby_tip: String,
    pub required_ingredients: Vec<String>,
}

impl RecipeRecord {
    /// Shown instead of recipes when no generator could be built
    pub fn unavailable(error: &GenerationError) -> Self {
        RecipeRecord {
            title: "Suggestions indisponibles".to_string(),
            desc: format!(
                "Aucun générateur de recettes n'est disponible ({}). Configure une clé API pour recevoir des idées de repas.",
                error
            ),
            ..Default::default()
        }
    }

    /// Shown instead of recipes when the generator call or its answer failed
    pub fn generation_failed() -> Self {
        RecipeRecord {
            title: "Oups !".to_string(),
            desc: "La génération des recettes a échoué. Réessaie un peu plus tard.".to_string(),
            ..Default::default()
        }
    }
}

/// Turns the week's deals into meal suggestions.
///
/// Always returns something renderable: a missing capability or a
/// failed call becomes a single placeholder record.
pub struct RecipeGenerator {
    generator: Result<Box<dyn TextGenerator>, GenerationError>,
}

impl RecipeGenerator {
    pub fn new(generator: Box<dyn TextGenerator>) -> Self {
        Self {
            generator: Ok(generator),
        }
    }

    pub fn unavailable(error: GenerationError) -> Self {
        Self {
            generator: Err(error),
        }
    }

    /// Build the provider named in `config`, which must already carry its credential
    pub fn from_config(config: &AiConfig) -> Self {
        Self {
            generator: ProviderFactory::create(config),
        }
    }

    pub fn is_available(&self) -> bool {
        self.generator.is_ok()
    }

    /// Ask for `MEAL_COUNT` recipes built around `items`. One attempt, no retry.
    pub async fn generate_recipes(
        &self,
        items: &[String],
        config: &PlannerConfig,
    ) -> Vec<RecipeRecord> {
        let generator = match &self.generator {
            Ok(generator) => generator.as_ref(),
            Err(e) => {
                warn!("Skipping recipe generation: {}", e);
                return vec![RecipeRecord::unavailable(e)];
            }
        };

        let prompt = build_recipe_prompt(items, config);
        debug!("Recipe prompt:\n{}", prompt);

        match request_recipes(generator, &prompt).await {
            Ok(recipes) => {
                info!(
                    "Generated {} recipes using {}",
                    recipes.len(),
                    generator.provider_name()
                );
                recipes
            }
            Err(e) => {
                warn!(
                    "Recipe generation with {} failed: {}",
                    generator.provider_name(),
                    e
                );
                vec![RecipeRecord::generation_failed()]
            }
        }
    }
}

async fn request_recipes(
    generator: &dyn TextGenerator,
    prompt: &str,
) -> Result<Vec<RecipeRecord>, GenerationError> {
    let text = generator.generate(prompt).await?;
    parse_recipes(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeGenerator {
        response: Option<String>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        fn provider_name(&self) -> &str {
            "fake"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .clone()
                .ok_or_else(|| GenerationError::Unavailable("network down".to_string()))
        }
    }

    fn generator(response: Option<&str>) -> (RecipeGenerator, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let fake = FakeGenerator {
            response: response.map(String::from),
            calls: Arc::clone(&calls),
        };
        (RecipeGenerator::new(Box::new(fake)), calls)
    }

    fn items() -> Vec<String> {
        vec!["Porc haché".to_string(), "Brocoli".to_string()]
    }

    #[tokio::test]
    async fn test_generate_recipes() {
        let (generator, calls) = generator(Some(
            r#"```json
            [{"title": "Sauté de porc", "desc": "Rapide", "baby_tip": "Couper en dés",
              "required_ingredients": ["Porc haché", "Brocoli", "Sauce soya"]}]
            ```"#,
        ));

        let recipes = generator
            .generate_recipes(&items(), &PlannerConfig::default())
            .await;
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Sauté de porc");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_capability_yields_placeholder() {
        let generator = RecipeGenerator::unavailable(GenerationError::Unavailable(
            "no API key configured for google".to_string(),
        ));
        assert!(!generator.is_available());

        let recipes = generator
            .generate_recipes(&items(), &PlannerConfig::default())
            .await;
        assert_eq!(recipes.len(), 1);
        assert!(!recipes[0].desc.is_empty());
        assert!(recipes[0].desc.contains("no API key"));
        assert!(recipes[0].required_ingredients.is_empty());
    }

    #[tokio::test]
    async fn test_from_config_without_key_is_unavailable() {
        let generator = RecipeGenerator::from_config(&AiConfig::default());
        assert!(!generator.is_available());
    }

    #[tokio::test]
    async fn test_malformed_response_yields_placeholder() {
        let (generator, calls) = generator(Some("not json"));
        let recipes = generator
            .generate_recipes(&items(), &PlannerConfig::default())
            .await;
        assert_eq!(recipes, vec![RecipeRecord::generation_failed()]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_call_is_not_retried() {
        let (generator, calls) = generator(None);
        let recipes = generator
            .generate_recipes(&items(), &PlannerConfig::default())
            .await;
        assert_eq!(recipes, vec![RecipeRecord::generation_failed()]);
        assert!(recipes[0].required_ingredients.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
