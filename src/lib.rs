//! gofuncount - count the line spans of Go functions
//!
//! Walks a Go source tree, records every function and method declaration's
//! line span, groups the results by directory or package, and derives
//! mean/median/95th/99th percentile summaries per group.
//!
//! ```no_run
//! use gofuncount::{config::RunConfig, runner::Runner};
//! use std::path::Path;
//!
//! let counts = Runner::new(RunConfig::default()).run(Path::new("."))?;
//! for (group, stats) in counts.stats() {
//!     println!("{group}: {:?}", stats.median);
//! }
//! # Ok::<(), gofuncount::error::RunError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod parsers;
pub mod reporters;
pub mod runner;
pub mod stats;

pub use error::{RunError, RunResult};
pub use models::{Counts, FunctionCount, Stats};
pub use stats::Sample;
