//! Enrichment check.
//!
//! Classifies a table of well-known exercises and exits non-zero when any
//! answer differs from the expected label or any exercise is missing.
//!
//! Usage:
//! ```bash
//! cargo run --bin trackfit-enrich-check
//! cargo run --bin trackfit-enrich-check -- --cases ./cases.toml
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use trackfit_cli::args::{CommonArgs, LlmArgs};
use trackfit_cli::check::{self, default_cases};
use trackfit_cli::{Classifier, logging};
use trackfit_core::ExerciseCatalog;

#[derive(Parser, Debug)]
#[command(
    name = "trackfit-enrich-check",
    about = "Check tracking-type classification against known exercises"
)]
struct CheckArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    llm: LlmArgs,

    /// TOML case table replacing the built-in one
    #[arg(long, value_name = "FILE")]
    cases: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = CheckArgs::parse();
    let mut config = args.common.load_config().context("Failed to load configuration")?;
    args.llm.apply(&mut config);

    logging::init(args.common.verbose, &config.general.log_level);

    let cases = match &args.cases {
        Some(path) => check::load_cases(path)
            .with_context(|| format!("Failed to load cases from {}", path.display()))?,
        None => default_cases(),
    };

    let catalog = ExerciseCatalog::open(&config.catalog.exercises_dir, &config.catalog.exercise_file)?;
    let classifier = Classifier::from_config(&config.llm);

    let report = check::run_check(&catalog, &classifier, &cases).await?;
    Ok(ExitCode::from(report.exit_code()))
}
