//! Tracking-type enricher.
//!
//! Asks a local model to classify each exercise's tracking type and writes
//! the result next to (or over) the exercise document.
//!
//! Usage:
//! ```bash
//! # Classify everything, writing enriched.json side files
//! cargo run --bin trackfit-enrich
//!
//! # First 20 exercises only, updating exercise.json in place
//! cargo run --bin trackfit-enrich -- -c 20 -o
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use trackfit_cli::args::{CommonArgs, LlmArgs};
use trackfit_cli::enricher::{self, EnrichOptions};
use trackfit_cli::{Classifier, logging};
use trackfit_core::ExerciseCatalog;

#[derive(Parser, Debug)]
#[command(
    name = "trackfit-enrich",
    about = "Classify exercise tracking types with a local language model"
)]
struct EnrichArgs {
    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    llm: LlmArgs,

    /// Process only the first N exercises
    #[arg(short = 'c', long = "count", value_name = "N")]
    count: Option<usize>,

    /// Update exercise.json in place instead of writing enriched.json
    #[arg(short = 'o', long = "override")]
    override_original: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = EnrichArgs::parse();
    let mut config = args.common.load_config().context("Failed to load configuration")?;
    args.llm.apply(&mut config);

    logging::init(args.common.verbose, &config.general.log_level);

    let catalog = ExerciseCatalog::open(&config.catalog.exercises_dir, &config.catalog.exercise_file)?;
    let classifier = Classifier::from_config(&config.llm);
    info!(
        model = %classifier.client().model(),
        endpoint = %classifier.client().base_url(),
        "Enriching exercises"
    );

    let options = EnrichOptions {
        count: args.count,
        override_original: args.override_original,
        enriched_file: config.catalog.enriched_file.clone(),
        exercise_file: config.catalog.exercise_file.clone(),
    };
    let summary = enricher::run_enrich(&catalog, &classifier, &options).await?;
    summary.log();
    Ok(())
}
