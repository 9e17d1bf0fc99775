mod html;

pub use html::render_report;

use crate::deals::FormattedDeal;
use crate::error::ReportError;
use crate::recipes::RecipeRecord;
use chrono::NaiveDate;
use log::info;
use std::path::Path;

/// Everything shown on the page
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContext {
    pub date: NaiveDate,
    pub deals: Vec<FormattedDeal>,
    pub recipes: Vec<RecipeRecord>,
    pub shopping_list: Vec<String>,
}

/// Write the rendered page, replacing whatever was at `path`.
///
/// Missing parent directories are created.
pub async fn write_report(path: &Path, html: &str) -> Result<(), ReportError> {
    let write_error = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }
    tokio::fs::write(path, html).await.map_err(write_error)?;

    info!("Wrote report to {}", path.display());
    Ok(())
}
