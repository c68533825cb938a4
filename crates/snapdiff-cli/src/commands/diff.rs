//! Diff command
//!
//! Usage: snapdiff diff --current <FILE> --pending <FILE> [--format json|summary|count]

use clap::{Args, ValueEnum};
use snapdiff_core::errors::{ExError, SnapDiffError};
use snapdiff_core::logging_facility::{init, Profile};
use snapdiff_core::{compute_snapshot_diff, render_human_summary};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Snapshot currently deployed
    #[arg(long)]
    pub current: PathBuf,

    /// Snapshot staged for deployment
    #[arg(long)]
    pub pending: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Emit logs to stderr (RUST_LOG overrides the level)
    #[arg(long, value_enum)]
    pub log_profile: Option<LogProfile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Structured differences as pretty JSON
    Json,
    /// Markdown summary for review
    Summary,
    /// Pending change count only
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogProfile {
    Development,
    Production,
}

impl From<LogProfile> for Profile {
    fn from(profile: LogProfile) -> Self {
        match profile {
            LogProfile::Development => Profile::Development,
            LogProfile::Production => Profile::Production,
        }
    }
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(profile) = args.log_profile {
        init(profile.into());
    }

    let current = read_snapshot(&args.current, "current")?;
    let pending = read_snapshot(&args.pending, "pending")?;

    let diff = compute_snapshot_diff(&current, &pending)?;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&diff).map_err(SnapDiffError::from)?;
            println!("{}", json);
        }
        OutputFormat::Summary => print!("{}", render_human_summary(&diff)),
        OutputFormat::Count => println!("{}", diff.pending_changes),
    }

    Ok(())
}

fn read_snapshot(path: &Path, side: &str) -> Result<Vec<u8>, ExError> {
    std::fs::read(path).map_err(|e| {
        ExError::from(SnapDiffError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
        .with_op("snapshot_read")
        .with_side(side)
    })
}
