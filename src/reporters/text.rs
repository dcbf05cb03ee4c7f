//! Text (terminal) reporter: a left-aligned table

use super::Report;
use anyhow::Result;

const RAW_HEADER: [&str; 6] = [
    "group",
    "function_name",
    "file_name",
    "start_line",
    "end_line",
    "lines",
];

const SUMMARY_HEADER: [&str; 5] = ["group", "mean", "median", "95%ile", "99%ile"];

/// Placeholder for undefined statistics
const UNDEFINED: &str = "-";

/// Render report as an aligned table
pub fn render(report: &Report<'_>) -> Result<String> {
    let rows: Vec<Vec<String>> = match report {
        Report::Raw(counts) => {
            let mut rows = vec![RAW_HEADER.iter().map(|s| s.to_string()).collect()];
            for (group, records) in counts.raw() {
                for f in records {
                    rows.push(vec![
                        group.clone(),
                        f.name.clone(),
                        f.file_name.display().to_string(),
                        f.starts_at.to_string(),
                        f.ends_at.to_string(),
                        f.lines().to_string(),
                    ]);
                }
            }
            rows
        }
        Report::Summary(stats) => {
            let mut rows = vec![SUMMARY_HEADER.iter().map(|s| s.to_string()).collect()];
            for (group, s) in stats {
                rows.push(vec![
                    group.clone(),
                    cell(s.mean),
                    cell(s.median),
                    cell(s.p95),
                    cell(s.p99),
                ]);
            }
            rows
        }
    };

    Ok(layout(&rows))
}

fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => UNDEFINED.to_string(),
    }
}

/// Pad every column to its widest cell, two spaces apart
fn layout(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{:<width$}", s, width = widths[i]))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}
