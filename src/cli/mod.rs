//! CLI definition and handler

use crate::config::{load_project_config, GroupBy, RunConfig};
use crate::error::RunError;
use crate::reporters::{self, OutputFormat, Report};
use crate::runner::Runner;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// gofuncount - count the lines of every Go function
#[derive(Parser, Debug)]
#[command(name = "gofuncount")]
#[command(
    version,
    about = "Count the line spans of Go functions per directory or package",
    after_help = "\
Examples:
  gofuncount .                             Raw records for the current module as JSON
  gofuncount . --stats                     Mean, median, 95th and 99th percentile per directory
  gofuncount . --stats --group-by package  Summaries per package name
  gofuncount main.go -f csv                One file, CSV output
  gofuncount . --include-tests -o out.json Include _test.go files, write to a file"
)]
pub struct Cli {
    /// File or directory to count
    pub path: PathBuf,

    /// Include _test.go files
    #[arg(long)]
    pub include_tests: bool,

    /// Output format: json, csv, text
    #[arg(long, short = 'f', value_parser = ["json", "csv", "text"])]
    pub output_format: Option<String>,

    /// Print per-group statistics instead of raw records
    #[arg(long)]
    pub stats: bool,

    /// Group functions by directory or by package name
    #[arg(long, value_parser = ["directory", "package"])]
    pub group_by: Option<String>,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Exclude paths matching this gitignore-style pattern (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Do not honor .gitignore and .ignore files
    #[arg(long)]
    pub no_gitignore: bool,

    /// Number of parallel parser threads (1-64)
    #[arg(long, value_parser = parse_workers)]
    pub workers: Option<usize>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

/// Failures mapped to process exit codes
#[derive(Error, Debug)]
pub enum CliError {
    #[error("invalid option: {0}")]
    InvalidOption(anyhow::Error),

    #[error("{0}")]
    Run(#[from] RunError),

    #[error("{0}")]
    Render(anyhow::Error),

    #[error("{0}")]
    Write(anyhow::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidOption(_) => 2,
            CliError::Run(_) => 3,
            CliError::Render(_) => 4,
            CliError::Write(_) => 5,
        }
    }
}

/// Fully resolved settings: CLI flags over project file over defaults
#[derive(Debug, Clone)]
pub struct Settings {
    pub run: RunConfig,
    pub format: OutputFormat,
    pub stats: bool,
}

impl Cli {
    pub fn settings(&self) -> Result<Settings, CliError> {
        let project = load_project_config(&self.path);
        let mut run = RunConfig::from_project(&project);

        run.include_tests |= self.include_tests;
        if let Some(ref group_by) = self.group_by {
            run.group_by = GroupBy::from_str(group_by).map_err(CliError::InvalidOption)?;
        }
        for pattern in &self.exclude {
            if !run.exclude.contains(pattern) {
                run.exclude.push(pattern.clone());
            }
        }
        if self.no_gitignore {
            run.respect_gitignore = false;
        }
        if let Some(workers) = self.workers {
            run.workers = workers;
        }

        let format = match self.output_format.as_deref().or(project.defaults.format.as_deref()) {
            Some(name) => OutputFormat::from_str(name).map_err(CliError::InvalidOption)?,
            None => OutputFormat::default(),
        };

        Ok(Settings {
            run,
            format,
            stats: self.stats || project.defaults.stats.unwrap_or(false),
        })
    }
}

/// Run the CLI and map failures to exit codes
pub fn run(cli: Cli) -> ExitCode {
    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("✗").red(), e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn execute(cli: &Cli) -> Result<(), CliError> {
    let settings = cli.settings()?;
    debug!("Resolved settings: {:?}", settings);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Counting functions in {}...", cli.path.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let counts = match Runner::new(settings.run.clone()).run(&cli.path) {
        Ok(counts) => counts,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    };

    spinner.finish_with_message(format!(
        "{}Counted {} functions in {} groups",
        style("✓ ").green(),
        style(counts.total_functions()).cyan(),
        style(counts.len()).cyan()
    ));

    let report = Report::from_counts(&counts, settings.stats);
    let rendered =
        reporters::report_with_format(&report, settings.format).map_err(CliError::Render)?;

    write_output(cli.output.as_deref(), &rendered).map_err(CliError::Write)
}

fn write_output(path: Option<&Path>, rendered: &str) -> anyhow::Result<()> {
    use anyhow::Context;

    match path {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")
        }
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .expect("valid template")
}
