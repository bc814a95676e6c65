//! Exercise catalog seeder.
//!
//! Upserts every `exercise.json` under the exercises root into the SQLite
//! store, keyed by exercise name.
//!
//! Usage:
//! ```bash
//! # Seed using ./trackfit.toml (or defaults)
//! cargo run --bin trackfit-seed
//!
//! # Explicit paths
//! cargo run --bin trackfit-seed -- --exercises-dir ./exercises --database ./trackfit.db
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use trackfit_cli::args::CommonArgs;
use trackfit_cli::{importer, logging};
use trackfit_core::{ExerciseCatalog, ExerciseStore};

#[derive(Parser, Debug)]
#[command(
    name = "trackfit-seed",
    about = "Import exercise definitions into the trackfit database"
)]
struct SeedArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Database path override
    #[arg(long, value_name = "PATH")]
    database: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = SeedArgs::parse();
    let mut config = args.common.load_config().context("Failed to load configuration")?;
    if let Some(db) = args.database {
        config.database.path = db;
    }

    logging::init(args.common.verbose, &config.general.log_level);

    let catalog = ExerciseCatalog::open(&config.catalog.exercises_dir, &config.catalog.exercise_file)
        .context("Fatal error during seed")?;
    let store = ExerciseStore::open(&config.database.path, config.database.wal_mode)
        .with_context(|| format!("Failed to open database {}", config.database.path.display()))?;

    info!(
        exercises = %catalog.root().display(),
        database = %store.db_path().display(),
        "Seeding exercises"
    );

    let summary = importer::run_import(&catalog, &store).context("Fatal error during seed")?;
    summary.log();
    Ok(())
}
