//! JSON reporter
//!
//! Raw reports map each group to its list of records; summaries map each
//! group to `{mean, median, 95%ile, 99%ile}` with `null` for undefined values.

use super::Report;
use anyhow::Result;

/// Render report as pretty-printed JSON
pub fn render(report: &Report<'_>) -> Result<String> {
    let mut out = match report {
        Report::Raw(counts) => serde_json::to_string_pretty(counts)?,
        Report::Summary(stats) => serde_json::to_string_pretty(stats)?,
    };
    out.push('\n');
    Ok(out)
}
