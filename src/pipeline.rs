use crate::config::PlannerConfig;
use crate::deals::{format_deals, DealSource};
use crate::error::ReportError;
use crate::pantry::PantrySet;
use crate::recipes::RecipeGenerator;
use crate::report::{render_report, write_report, ReportContext};
use crate::shopping::consolidate;
use chrono::NaiveDate;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Result of one run: what was shown and where it went
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub context: ReportContext,
    pub html: String,
    pub path: PathBuf,
}

/// Deals → recipes → shopping list → HTML, in that order
pub struct ReportPipeline {
    deal_source: Box<dyn DealSource>,
    generator: RecipeGenerator,
}

impl ReportPipeline {
    pub fn new(deal_source: Box<dyn DealSource>, generator: RecipeGenerator) -> Self {
        Self {
            deal_source,
            generator,
        }
    }

    /// Build the context without touching the file system
    pub async fn build_context(
        &self,
        config: &PlannerConfig,
        pantry: &PantrySet,
        date: NaiveDate,
    ) -> ReportContext {
        let deals = match self.deal_source.weekly_deals().await {
            Ok(deals) => deals,
            Err(e) => {
                warn!(
                    "Deal source '{}' failed, continuing without deals: {}",
                    self.deal_source.source_name(),
                    e
                );
                Vec::new()
            }
        };

        let malformed = deals.iter().filter(|deal| !deal.is_well_formed()).count();
        if malformed > 0 {
            warn!("{} deal(s) have inconsistent prices", malformed);
        }

        let (items, deals) = format_deals(&deals);
        info!("Found {} deals", deals.len());

        let recipes = self.generator.generate_recipes(&items, config).await;
        let shopping_list = consolidate(&recipes, pantry);
        info!(
            "Shopping list has {} item(s) after checking {} pantry entries",
            shopping_list.len(),
            pantry.len()
        );

        ReportContext {
            date,
            deals,
            recipes,
            shopping_list,
        }
    }

    /// Run the whole pipeline and write the page to `output`.
    ///
    /// Only a failed render or write is an error; every other failure has
    /// already been turned into a default or a placeholder.
    pub async fn run(
        &self,
        config: &PlannerConfig,
        pantry: &PantrySet,
        date: NaiveDate,
        output: &Path,
    ) -> Result<GeneratedReport, ReportError> {
        let context = self.build_context(config, pantry, date).await;
        let html = render_report(&context)?;
        write_report(output, &html).await?;

        Ok(GeneratedReport {
            context,
            html,
            path: output.to_path_buf(),
        })
    }
}
