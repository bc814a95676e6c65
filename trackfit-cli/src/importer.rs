//! Catalog → store import.
//!
//! Walks every exercise folder, upserts each record by name, and keeps
//! counters. A folder without a document is skipped; a broken document or a
//! failed write is counted as an error. Neither stops the run.

use tracing::{error, info, warn};
use trackfit_core::catalog::ExerciseCatalog;
use trackfit_core::error::Result;
use trackfit_core::store::{ExerciseStore, UpsertOutcome};

/// Successful writes between progress lines.
pub const PROGRESS_EVERY: usize = 50;

/// Whether a progress line is due after `imported` successful writes.
#[must_use]
pub fn progress_due(imported: usize) -> bool {
    imported > 0 && imported % PROGRESS_EVERY == 0
}

/// Counters for one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Folders found under the root.
    pub total: usize,
    /// Records written (inserted, updated or already current).
    pub imported: usize,
    /// New rows.
    pub inserted: usize,
    /// Rows that changed.
    pub updated: usize,
    /// Rows already matching their record.
    pub unchanged: usize,
    /// Folders without an exercise document.
    pub skipped: usize,
    /// Folders whose record could not be read or written.
    pub errors: usize,
}

impl ImportSummary {
    /// Log the end-of-run summary.
    pub fn log(&self) {
        info!("=== Import Summary ===");
        info!(
            inserted = self.inserted,
            updated = self.updated,
            unchanged = self.unchanged,
            "Successfully imported: {}",
            self.imported
        );
        info!("Skipped: {}", self.skipped);
        info!("Errors: {}", self.errors);
        info!("Total: {}", self.total);
    }
}

/// Import every exercise in `catalog` into `store`.
///
/// # Errors
///
/// Only fails when the catalog root cannot be listed; per-record problems
/// are counted in the summary.
pub fn run_import(catalog: &ExerciseCatalog, store: &ExerciseStore) -> Result<ImportSummary> {
    let folders = catalog.folders()?;
    let mut summary = ImportSummary {
        total: folders.len(),
        ..ImportSummary::default()
    };
    info!("Found {} exercise folders", summary.total);

    for folder in &folders {
        let exercise = match catalog.load(folder) {
            Ok(Some(exercise)) => exercise,
            Ok(None) => {
                warn!(folder = %folder, "No exercise document found");
                summary.skipped += 1;
                continue;
            }
            Err(e) => {
                error!(folder = %folder, "Error importing: {e}");
                summary.errors += 1;
                continue;
            }
        };

        match store.upsert(&exercise) {
            Ok(outcome) => {
                match outcome {
                    UpsertOutcome::Inserted => summary.inserted += 1,
                    UpsertOutcome::Updated => summary.updated += 1,
                    UpsertOutcome::Unchanged => summary.unchanged += 1,
                }
                summary.imported += 1;
                if progress_due(summary.imported) {
                    info!("Imported {}/{} exercises...", summary.imported, summary.total);
                }
            }
            Err(e) => {
                error!(folder = %folder, exercise = %exercise.name, "Error importing: {e}");
                summary.errors += 1;
            }
        }
    }

    Ok(summary)
}
