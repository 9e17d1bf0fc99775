pub mod config;
pub mod deals;
pub mod error;
pub mod pantry;
pub mod pipeline;
pub mod providers;
pub mod recipes;
pub mod report;
pub mod shopping;

pub use crate::config::{
    load_config, AiConfig, DealsConfig, DefaultReason, LoadOutcome, PlannerConfig,
};
pub use deals::{
    deal_source, format_deals, DealRecord, DealSource, FormattedDeal, HttpDealSource,
    SeedDealSource,
};
pub use error::{GenerationError, ReportError};
pub use pantry::{load_pantry, PantrySet};
pub use pipeline::{GeneratedReport, ReportPipeline};
pub use providers::{ProviderFactory, TextGenerator};
pub use recipes::{RecipeGenerator, RecipeRecord};
pub use report::{render_report, write_report, ReportContext};
pub use shopping::consolidate;

use chrono::Local;
use std::path::Path;

/// Build this week's report from files on disk.
///
/// Loads the config and pantry (falling back to defaults), resolves the
/// provider credential from the environment once, then runs the
/// pipeline and writes the page to `output`. `deals_url` replaces the
/// feed URL from the config file.
pub async fn generate_report(
    config_path: &Path,
    pantry_path: &Path,
    output: &Path,
    deals_url: Option<String>,
) -> Result<GeneratedReport, ReportError> {
    let mut config = load_config(config_path).into_logged(config_path);
    let pantry = load_pantry(pantry_path).into_logged(pantry_path);

    if deals_url.is_some() {
        config.deals.url = deals_url;
    }
    let source = deal_source(&config.deals)?;

    let ai = config.ai.clone().with_env_credentials();
    let generator = RecipeGenerator::from_config(&ai);

    ReportPipeline::new(source, generator)
        .run(&config, &pantry, Local::now().date_naive(), output)
        .await
}
