// crates/bk_cli/src/args.rs
//
// CLI argument surface for `bakery`.
// - Dates are calendar days, YYYY-MM-DD.
// - Data paths must be local files (no scheme://).
// - `--as-of` / `--date` default to the local calendar day.

use std::path::{Path, PathBuf};

use bk_core::CriterionKind;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "bakery",
    disable_help_subcommand = true,
    about = "Production-priority ranking and profit reports for a small bakery"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log level when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info",
          value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: String,

    /// Only warnings and errors on stderr; no summary lines.
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Rank active products over the trailing 30 days.
    Rank {
        #[arg(long)]
        data: PathBuf,
        /// Last day of the window (default: today).
        #[arg(long, value_parser = parse_date)]
        as_of: Option<NaiveDate>,
        /// Write the ranking artifact (canonical JSON) here.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Upsert this run into a snapshot file.
        #[arg(long)]
        snapshots: Option<PathBuf>,
        /// Print rows as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Financial report over an inclusive date range.
    Report {
        #[arg(long)]
        data: PathBuf,
        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,
        #[arg(long, value_parser = parse_date)]
        to: NaiveDate,
        /// Restrict to one product id.
        #[arg(long)]
        product: Option<String>,
    },
    /// Profit and best seller for one day.
    Stats {
        #[arg(long)]
        data: PathBuf,
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Load and check a dataset without computing anything.
    Validate {
        #[arg(long)]
        data: PathBuf,
    },
    /// Set criteria weights (e.g. --set C1=0.4 --set C3=0.1) and rewrite the dataset.
    Weights {
        #[arg(long)]
        data: PathBuf,
        #[arg(long = "set", value_parser = parse_weight, required = true)]
        set: Vec<(CriterionKind, f64)>,
    },
    /// Add the sample products to a dataset with an empty catalog.
    /// A missing file is created with the samples and default criteria.
    Seed {
        #[arg(long)]
        out: PathBuf,
    },
}

/// Errors surfaced by argument validation beyond what clap checks.
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    BadRange { from: NaiveDate, to: NaiveDate },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            BadRange { from, to } => write!(f, "--from {from} is after --to {to}"),
        }
    }
}
impl std::error::Error for CliError {}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// `C1=0.4` → (Margin, 0.4).
pub fn parse_weight(s: &str) -> Result<(CriterionKind, f64), String> {
    let (code, value) = s.split_once('=').ok_or_else(|| "expected CODE=WEIGHT".to_string())?;
    let kind: CriterionKind = code.trim().parse().map_err(|e| format!("{e}: {code}"))?;
    let weight: f64 = value.trim().parse().map_err(|_| format!("not a number: {value}"))?;
    Ok((kind, weight))
}

/// Reject any explicit URI scheme (e.g., http://, file://).
fn ensure_local(p: &Path) -> Result<(), CliError> {
    let s = p.to_string_lossy();
    if s.contains("://") {
        return Err(CliError::NonLocalPath(s.into_owned()));
    }
    Ok(())
}

/// Parse argv and apply the cross-flag checks clap cannot express.
pub fn parse_and_validate() -> Result<Args, CliError> {
    let args = Args::parse();
    validate(&args)?;
    Ok(args)
}

pub fn validate(args: &Args) -> Result<(), CliError> {
    match &args.command {
        Command::Rank { data, out, snapshots, .. } => {
            ensure_local(data)?;
            for p in [out, snapshots].into_iter().flatten() {
                ensure_local(p)?;
            }
        }
        Command::Report { data, from, to, .. } => {
            ensure_local(data)?;
            if from > to {
                return Err(CliError::BadRange { from: *from, to: *to });
            }
        }
        Command::Stats { data, .. } | Command::Validate { data } | Command::Weights { data, .. } => {
            ensure_local(data)?;
        }
        Command::Seed { out } => ensure_local(out)?,
    }
    Ok(())
}
