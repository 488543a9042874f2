//! Report and chart rendering
//!
//! Turns backend results and generated reports into self-contained HTML
//! fragments. Charts are prepared as plain data series; the markdown module
//! renders report section bodies.

pub mod charts;
pub mod markdown;

use shared::models::{AssessmentResult, Report};

use charts::{display_name, normalize_impact_data};
use markdown::{html_escape, markdown_to_html};

/// Render a generated report as one HTML fragment: title, provenance line,
/// then every section in stored order.
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();

    let title = display_name(&report.report_type);
    out.push_str(&format!("<h1>{} Report</h1>\n", html_escape(&title)));

    let mut provenance: Vec<String> = Vec::new();
    if let Some(company) = &report.company_name {
        provenance.push(html_escape(company));
    }
    if let Some(country) = &report.country {
        provenance.push(html_escape(country));
    }
    provenance.push(html_escape(&report.generated_at));
    out.push_str(&format!(
        "<p class=\"provenance\">{}</p>\n",
        provenance.join(" · ")
    ));

    for (key, body) in &report.sections {
        out.push_str(&format!(
            "<section id=\"{}\">\n<h2>{}</h2>\n",
            html_escape(key),
            html_escape(&display_name(key))
        ));
        out.push_str(&markdown_to_html(body));
        out.push_str("</section>\n");
    }

    out
}

/// Render the midpoint impact chart data as an HTML table, largest impact
/// first with its normalized score.
pub fn render_impact_table(result: &AssessmentResult) -> String {
    let data = normalize_impact_data(&result.midpoint_impacts);
    if data.is_empty() {
        return "<p>No impact data available.</p>\n".to_string();
    }

    let mut out = String::from(
        "<table class=\"impacts\">\n<thead><tr><th>Category</th><th>Value</th><th>Unit</th><th>Score</th></tr></thead>\n<tbody>\n",
    );
    for datum in &data {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{:.4}</td><td>{}</td><td>{:.0}</td></tr>\n",
            html_escape(&datum.name),
            datum.raw_value,
            html_escape(&datum.unit),
            datum.score
        ));
    }
    out.push_str("</tbody>\n</table>\n");
    out
}
