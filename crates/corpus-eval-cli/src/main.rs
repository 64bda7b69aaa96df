//! corpus-eval - corpus quality metrics and baseline regression gate
//!
//! ## Commands
//!
//! - `compute`: Compute heuristic corpus metrics and write `eval/metrics.json`
//! - `check`: Compare a metrics report against a baseline and write a Markdown report
//! - `update-baseline`: Promote the current metrics report to the baseline
//! - `seed-metrics`: Write placeholder metrics from the baseline when none exist

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use corpus_eval_core::{EvalConfig, GateVerdict, RunSpan, SeedOutcome, DEFAULT_MAX_DOCS};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "corpus-eval")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Corpus quality metrics and baseline regression gate", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RootArgs {
    /// Project root holding data/, graph/, docs/ and eval/
    #[arg(long, env = "CORPUS_EVAL_ROOT", default_value = ".")]
    root: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute corpus metrics and write them to <root>/eval/metrics.json
    Compute {
        #[command(flatten)]
        root: RootArgs,

        /// Maximum number of corpus documents to load
        #[arg(long, default_value_t = DEFAULT_MAX_DOCS)]
        max_docs: usize,

        /// Rank documents by score before computing NDCG@10
        #[arg(long)]
        rank_by_score: bool,
    },

    /// Compare a metrics report against a baseline
    Check {
        /// Baseline JSON with minimum acceptable values
        #[arg(long)]
        baseline: PathBuf,

        /// Metrics JSON to check (may be nested)
        #[arg(long)]
        metrics: PathBuf,

        /// Output path for the Markdown report
        #[arg(long)]
        report: PathBuf,
    },

    /// Overwrite <root>/eval/baseline.json with <root>/eval/metrics.json
    UpdateBaseline {
        #[command(flatten)]
        root: RootArgs,

        /// Overwrite an existing baseline
        #[arg(long)]
        force: bool,
    },

    /// Write placeholder metrics derived from the baseline if none exist
    SeedMetrics {
        #[command(flatten)]
        root: RootArgs,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    corpus_eval_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Compute {
            root,
            max_docs,
            rank_by_score,
        } => {
            let config = EvalConfig::for_root(root.root)
                .with_max_docs(max_docs)
                .with_rank_by_score(rank_by_score);
            cmd_compute(&config)?;
        }
        Commands::Check {
            baseline,
            metrics,
            report,
        } => {
            let verdict = cmd_check(&baseline, &metrics, &report)?;
            return Ok(ExitCode::from(verdict.exit_code()));
        }
        Commands::UpdateBaseline { root, force } => {
            cmd_update_baseline(&EvalConfig::for_root(root.root), force)?;
        }
        Commands::SeedMetrics { root } => cmd_seed_metrics(&EvalConfig::for_root(root.root))?,
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_compute(config: &EvalConfig) -> Result<()> {
    let _span = RunSpan::enter("compute");
    let report = corpus_eval_core::run_pipeline(config)
        .with_context(|| format!("Failed to compute metrics under {:?}", config.root))?;

    println!(
        "Wrote {}: {}",
        config.metrics_path.display(),
        report.to_compact_json()?
    );
    Ok(())
}

/// Run the gate and print a one-line summary.
fn cmd_check(baseline: &Path, metrics: &Path, report: &Path) -> Result<GateVerdict> {
    let _span = RunSpan::enter("check");
    let verdict = corpus_eval_core::run_gate(baseline, metrics, report)
        .context("Regression gate could not run")?;

    let failed = verdict.failed_rows().count();
    if verdict.passed() {
        println!(
            "All {} baseline metric(s) passed; report at {}",
            verdict.rows.len(),
            report.display()
        );
    } else {
        println!(
            "{} of {} baseline metric(s) failed; report at {}",
            failed,
            verdict.rows.len(),
            report.display()
        );
    }
    Ok(verdict)
}

fn cmd_update_baseline(config: &EvalConfig, force: bool) -> Result<()> {
    let _span = RunSpan::enter("update-baseline");
    corpus_eval_core::update_baseline(&config.metrics_path, &config.baseline_path, force)?;
    println!(
        "{} updated from {}",
        config.baseline_path.display(),
        config.metrics_path.display()
    );
    Ok(())
}

fn cmd_seed_metrics(config: &EvalConfig) -> Result<()> {
    let _span = RunSpan::enter("seed-metrics");
    let outcome = corpus_eval_core::seed_placeholder_metrics(
        &config.baseline_path,
        &config.metrics_path,
    )
    .with_context(|| format!("Failed to seed metrics from {:?}", config.baseline_path))?;

    match outcome {
        SeedOutcome::Kept => {
            info!(path = %config.metrics_path.display(), "metrics report already present");
            println!("{} exists, keeping it", config.metrics_path.display());
        }
        SeedOutcome::Written => {
            println!("Wrote placeholder {}", config.metrics_path.display());
        }
    }
    Ok(())
}
