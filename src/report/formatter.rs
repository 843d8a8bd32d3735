// Markdown formatting utilities shared by the report renderers

/// Build a markdown section header
pub fn build_section_header(title: &str, level: u8) -> String {
    let hashes = "#".repeat(level as usize);
    format!("{} {}\n\n", hashes, title)
}

/// Build a markdown table from headers and rows
pub fn build_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut table = String::new();

    table.push_str("| ");
    table.push_str(&headers.join(" | "));
    table.push_str(" |\n");

    table.push('|');
    for _ in headers {
        table.push_str("--------|");
    }
    table.push('\n');

    for row in rows {
        table.push_str("| ");
        table.push_str(&row.join(" | "));
        table.push_str(" |\n");
    }

    table
}

/// Format an epoch-millisecond timestamp as ISO 8601 UTC.
///
/// Pure function of the epoch value; never consults wall-clock time.
pub fn format_timestamp(millis: i64) -> String {
    use chrono::{TimeZone, Utc};

    match Utc.timestamp_millis_opt(millis) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        _ => format!("{} ms (Unix epoch)", millis),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_section_header() {
        assert_eq!(build_section_header("Title", 1), "# Title\n\n");
        assert_eq!(build_section_header("Subtitle", 3), "### Subtitle\n\n");
    }

    #[test]
    fn test_build_table() {
        let headers = vec!["Metric", "Value"];
        let rows = vec![vec!["VWAP".to_string(), "101.00".to_string()]];

        let table = build_table(&headers, &rows);
        assert!(table.contains("| Metric | Value |"));
        assert!(table.contains("| VWAP | 101.00 |"));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00 UTC");
        assert_eq!(format_timestamp(1672531200000), "2023-01-01 00:00:00 UTC");
    }
}
