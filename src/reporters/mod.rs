//! Output reporters for gofuncount results
//!
//! Supports multiple output formats:
//! - `json` - Machine-readable, pretty-printed JSON
//! - `csv` - RFC 4180 CSV with CRLF line endings
//! - `text` - Aligned table for terminals

mod csv;
mod json;
mod text;

use crate::models::{Counts, Stats};
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Text,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "text" | "txt" | "table" => Ok(OutputFormat::Text),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: json, csv, text",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// What to render: every record, or one summary per group
#[derive(Debug, Clone)]
pub enum Report<'a> {
    Raw(&'a Counts),
    Summary(BTreeMap<String, Stats>),
}

impl<'a> Report<'a> {
    /// Raw records, or their per-group statistics when `stats` is set
    pub fn from_counts(counts: &'a Counts, stats: bool) -> Self {
        if stats {
            Report::Summary(counts.stats())
        } else {
            Report::Raw(counts)
        }
    }
}

/// Render a report in the specified format
pub fn report(report: &Report<'_>, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(report, fmt)
}

/// Render a report using an OutputFormat enum
pub fn report_with_format(report: &Report<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::render(report),
        OutputFormat::Csv => csv::render(report),
        OutputFormat::Text => text::render(report),
    }
}
