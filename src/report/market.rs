//! Combined market report rendering
//!
//! Renders the seven-metric descriptive report as a markdown table, one row
//! per metric with its static explanation.

use crate::analysis::types::{MarketReport, MetricValue};
use crate::report::formatter;

fn format_value(value: &MetricValue) -> String {
    match value {
        MetricValue::Single(v) => format!("{}", v),
        MetricValue::Pair(bid, ask) => format!("({}, {})", bid, ask),
    }
}

/// Render the market report for `symbol` as markdown.
pub fn render_market_report(report: &MarketReport, symbol: &str) -> String {
    let mut doc = formatter::build_section_header(&format!("Market Report: {}", symbol), 1);

    let headers = vec!["Metric", "Value", "Explanation"];
    let rows: Vec<Vec<String>> = report
        .metrics
        .iter()
        .map(|m| {
            vec![
                m.name.to_string(),
                format_value(&m.value),
                m.explanation.clone(),
            ]
        })
        .collect();

    doc.push_str(&formatter::build_table(&headers, &rows));
    doc.push('\n');
    doc
}
