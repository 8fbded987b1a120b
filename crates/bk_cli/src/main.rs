// crates/bk_cli/src/main.rs
//
// `bakery` entry point: parse args, install logging, dispatch one subcommand,
// and map typed errors onto stable exit codes.

mod args;
mod logging;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
}

use std::path::Path;
use std::process::ExitCode;

use args::{parse_and_validate as parse_cli, Args, Command};
use bk_core::ProductId;
use bk_io::canonical_json::write_canonical_file;
use bk_io::loader::{self, LoadedDataset};
use bk_pipeline::{
    build_ranking_artifact, calculate_ranking, dashboard_stats, financial_report, seed, BakeryCtx,
    PipelineError, RankedRow, ReportQuery, SnapshotStore,
};
use chrono::{Local, NaiveDate};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Bad arguments, malformed or inconsistent data, rejected edits
    Validation(String),
    /// Read/write/path/limit failures
    Io(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) | MainError::Io(m) => f.write_str(m),
        }
    }
}

impl From<bk_io::IoError> for MainError {
    fn from(e: bk_io::IoError) -> Self {
        use bk_io::IoError::*;
        match e {
            Json { .. } | Invalid(_) | Hash(_) => MainError::Validation(e.to_string()),
            Path(_) | Limit(_) => MainError::Io(e.to_string()),
        }
    }
}

impl From<PipelineError> for MainError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Io(io) => io.into(),
            other => MainError::Validation(other.to_string()),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("bakery: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    let level = if args.quiet { "warn" } else { args.log_level.as_str() };
    logging::init_subscriber(level);

    let rc = match run(&args) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("bakery: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

fn map_error(e: &MainError) -> i32 {
    match e {
        MainError::Validation(_) => exitcodes::VALIDATION,
        MainError::Io(_) => exitcodes::IO,
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn load_ctx(path: &Path) -> Result<(LoadedDataset, BakeryCtx), MainError> {
    let loaded = loader::load_dataset(path)?;
    let ctx = BakeryCtx::from_dataset(&loaded.dataset)?;
    Ok((loaded, ctx))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), MainError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| MainError::Io(e.to_string()))?;
    println!("{text}");
    Ok(())
}

fn run(args: &Args) -> Result<(), MainError> {
    match &args.command {
        Command::Rank { data, as_of, out, snapshots, json } => {
            let (loaded, ctx) = load_ctx(data)?;
            let as_of = as_of.unwrap_or_else(today);
            let rows = calculate_ranking(&ctx, as_of);

            if *json {
                print_json(&rows)?;
            } else {
                print_table(&rows);
            }

            if let Some(path) = snapshots {
                let mut store = SnapshotStore::load(path)?;
                store.save(as_of, &rows);
                store.write(path)?;
            }
            if let Some(path) = out {
                let artifact =
                    build_ranking_artifact(as_of, &loaded.digest, &ctx.criteria.weights(), rows)?;
                write_canonical_file(&artifact, path)?;
                tracing::info!(id = %artifact.id, path = %path.display(), "ranking written");
            }
            Ok(())
        }

        Command::Report { data, from, to, product } => {
            let (_, ctx) = load_ctx(data)?;
            let product = product
                .as_deref()
                .map(str::parse::<ProductId>)
                .transpose()
                .map_err(|e| MainError::Validation(format!("--product: {e}")))?;
            let report = financial_report(&ctx, &ReportQuery { from: *from, to: *to, product })?;
            print_json(&report)
        }

        Command::Stats { data, date } => {
            let (_, ctx) = load_ctx(data)?;
            print_json(&dashboard_stats(&ctx, date.unwrap_or_else(today))?)
        }

        Command::Validate { data } => {
            let (loaded, ctx) = load_ctx(data)?;
            if !ctx.criteria.is_total_valid() {
                tracing::warn!(total = ctx.criteria.total_weight(), "criteria weights do not total 1.0");
            }
            if !args.quiet {
                eprintln!(
                    "validate: OK ({} products, {} recaps, sha256 {})",
                    loaded.dataset.products.len(),
                    loaded.dataset.recaps.len(),
                    loaded.digest
                );
            }
            Ok(())
        }

        Command::Weights { data, set } => {
            let (_, mut ctx) = load_ctx(data)?;
            ctx.criteria.update_weights(set)?;
            loader::write_dataset(&ctx.to_dataset(), data)?;
            for c in ctx.criteria.list() {
                println!("{}  {:<22} {:.3}", c.kind, c.name, c.weight);
            }
            Ok(())
        }

        Command::Seed { out } => {
            if !out.exists() {
                loader::write_dataset(&seed::sample_dataset(), out)?;
                tracing::info!(path = %out.display(), "sample dataset written");
                return Ok(());
            }
            let (_, mut ctx) = load_ctx(out)?;
            let added = seed::seed_catalog(&mut ctx)?;
            // a populated catalog leaves the file untouched
            if added > 0 {
                loader::write_dataset(&ctx.to_dataset(), out)?;
            }
            tracing::info!(added, path = %out.display(), "sample products seeded");
            Ok(())
        }
    }
}

fn print_table(rows: &[RankedRow]) {
    println!("{:>4}  {:>6}  {:<6}  {:<24}  {}", "rank", "score", "tier", "product", "recommendation");
    for r in rows {
        println!(
            "{:>4}  {:>6.3}  {:<6}  {:<24}  {}",
            r.rank, r.final_score, r.tier.as_str(), r.name, r.recommendation
        );
    }
    if rows.is_empty() {
        println!("(no active products)");
    }
}
