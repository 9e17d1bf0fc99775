use super::ReportContext;
use crate::error::ReportError;
use askama::Template;

/// Page template; askama escapes every interpolated value as HTML text.
#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate<'a> {
    date: String,
    context: &'a ReportContext,
}

/// Render the full page. Pure: the same context always yields the same bytes.
pub fn render_report(context: &ReportContext) -> Result<String, ReportError> {
    let template = ReportTemplate {
        date: context.date.format("%Y-%m-%d").to_string(),
        context,
    };
    Ok(template.render()?)
}
