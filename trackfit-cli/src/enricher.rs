//! Tracking-type enrichment.
//!
//! For each exercise folder (optionally only the first N), classify the
//! record and write the authored document back with only `trackingType`
//! set, either over the original or into a sibling side file. Records are processed one
//! at a time with a fixed pause after each classification call.

use tracing::{error, info, warn};
use trackfit_core::catalog::{ExerciseCatalog, set_tracking_type};
use trackfit_core::error::Result;

use crate::classify::Classifier;

/// Output policy and limits for one run.
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Process only the first `count` folders.
    pub count: Option<usize>,
    /// Overwrite the original document instead of writing a side file.
    pub override_original: bool,
    /// Side file name used when not overriding.
    pub enriched_file: String,
    /// Original document name, used when overriding.
    pub exercise_file: String,
}

/// A record that could not be enriched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRecord {
    /// Exercise name, or the folder name when the document was unreadable.
    pub name: String,
    /// Folder holding the record.
    pub folder: String,
    /// Why it failed.
    pub reason: String,
}

/// Counters for one enrichment run.
#[derive(Debug, Clone, Default)]
pub struct EnrichSummary {
    /// Folders selected for this run.
    pub selected: usize,
    /// Records classified and written.
    pub successful: usize,
    /// Folders without an exercise document.
    pub skipped: usize,
    /// Records that could not be read, classified or written.
    pub failed: Vec<FailedRecord>,
    /// Whether originals were overwritten.
    pub override_original: bool,
}

impl EnrichSummary {
    /// Log the end-of-run summary, listing every failed record.
    pub fn log(&self) {
        info!(
            skipped = self.skipped,
            "Complete: {} successful, {} failed",
            self.successful,
            self.failed.len()
        );
        if self.override_original {
            info!("Updated {} exercise files directly", self.successful);
        } else {
            info!("Created {} enriched files", self.successful);
        }
        if !self.failed.is_empty() {
            warn!("Failed exercises:");
            for f in &self.failed {
                warn!("  - {} ({}): {}", f.name, f.folder, f.reason);
            }
        }
    }
}

/// Classify and write back the selected exercises in `catalog`.
///
/// # Errors
///
/// Only fails when the catalog root cannot be listed; per-record problems
/// are collected in [`EnrichSummary::failed`].
pub async fn run_enrich(
    catalog: &ExerciseCatalog,
    classifier: &Classifier,
    options: &EnrichOptions,
) -> Result<EnrichSummary> {
    let mut folders = catalog.folders()?;
    if let Some(limit) = options.count {
        folders.truncate(limit);
    }

    let mut summary = EnrichSummary {
        selected: folders.len(),
        override_original: options.override_original,
        ..EnrichSummary::default()
    };
    info!("Processing {} exercises...", summary.selected);

    let output_file = if options.override_original {
        &options.exercise_file
    } else {
        &options.enriched_file
    };

    for (i, folder) in folders.iter().enumerate() {
        let (exercise, mut document) = match catalog.load_document(folder) {
            Ok(Some(loaded)) => loaded,
            Ok(None) => {
                warn!(folder = %folder, "No exercise document found");
                summary.skipped += 1;
                continue;
            }
            Err(e) => {
                error!(folder = %folder, "{e}");
                summary.failed.push(FailedRecord {
                    name: folder.clone(),
                    folder: folder.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        info!("[{}/{}] Processing: {}", i + 1, summary.selected, exercise.name);

        match classifier.classify(&exercise).await {
            Ok(tracking_type) => {
                set_tracking_type(&mut document, tracking_type);
                match catalog.write_document(folder, output_file, &document) {
                    Ok(_) => summary.successful += 1,
                    Err(e) => {
                        error!(folder = %folder, exercise = %exercise.name, "Write failed: {e}");
                        summary.failed.push(FailedRecord {
                            name: exercise.name.clone(),
                            folder: folder.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
            Err(e) => {
                error!(exercise = %exercise.name, "Classification failed: {e}");
                summary.failed.push(FailedRecord {
                    name: exercise.name.clone(),
                    folder: folder.clone(),
                    reason: e.to_string(),
                });
            }
        }

        classifier.pace().await;
    }

    Ok(summary)
}
