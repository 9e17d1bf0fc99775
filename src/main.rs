use clap::Parser;
use log::info;
use mealplan_report::generate_report;
use std::path::PathBuf;

/// Build a weekly meal-plan page from grocery deals and your pantry
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Household preferences (JSON or TOML)
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// JSON list of ingredients already on hand
    #[arg(long, default_value = "pantry.json")]
    pantry: PathBuf,

    /// Where to write the HTML page
    #[arg(short, long, default_value = "index.html")]
    output: PathBuf,

    /// Fetch deals from this JSON feed (overrides `deals.url` in the config)
    #[arg(long)]
    deals_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "mealplan_report=debug,info"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let report = generate_report(&args.config, &args.pantry, &args.output, args.deals_url).await?;
    info!(
        "Report ready: {} recipes, {} items to buy, written to {}",
        report.context.recipes.len(),
        report.context.shopping_list.len(),
        report.path.display()
    );

    Ok(())
}
