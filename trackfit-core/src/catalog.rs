//! Directory-based exercise catalog.
//!
//! The catalog root holds one subdirectory per exercise, each with a
//! fixed-named JSON document:
//!
//! ```text
//! exercises/
//!   Barbell_Squat/
//!     exercise.json
//!     enriched.json      (written by the enricher)
//!   Plank/
//!     exercise.json
//! ```
//!
//! Folder enumeration is sorted by name so every operation sees the same
//! order. A folder without the document is reported as `Ok(None)`; a broken
//! document is an error for that folder only.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};
use crate::types::{Exercise, TrackingType};

/// Default name of the per-exercise document.
pub const EXERCISE_FILE: &str = "exercise.json";

/// Default name of the side file written by the enricher.
pub const ENRICHED_FILE: &str = "enriched.json";

/// Key the enricher writes into each document.
pub const TRACKING_TYPE_KEY: &str = "trackingType";

/// A raw exercise document. Key order is the authored order.
pub type Document = serde_json::Map<String, Value>;

/// Handle to an exercises root directory.
#[derive(Debug, Clone)]
pub struct ExerciseCatalog {
    root: PathBuf,
    file_name: String,
}

impl ExerciseCatalog {
    /// Open a catalog rooted at `root`, reading `file_name` from each folder.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::RootNotFound`] if `root` is not a directory.
    pub fn open(root: impl Into<PathBuf>, file_name: impl Into<String>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(CatalogError::RootNotFound(root));
        }
        Ok(Self {
            root,
            file_name: file_name.into(),
        })
    }

    /// The catalog root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a folder's exercise document.
    #[must_use]
    pub fn record_path(&self, folder: &str) -> PathBuf {
        self.root.join(folder).join(&self.file_name)
    }

    /// Immediate subdirectories of the root, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the root cannot be listed.
    pub fn folders(&self) -> Result<Vec<String>> {
        let mut folders = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => folders.push(name),
                Err(raw) => warn!(folder = ?raw, "Skipping folder with non UTF-8 name"),
            }
        }
        folders.sort();
        debug!(root = %self.root.display(), count = folders.len(), "Listed exercise folders");
        Ok(folders)
    }

    /// Load the exercise document in `folder`.
    ///
    /// Returns `Ok(None)` when the folder has no document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] for invalid JSON, or
    /// [`CatalogError::Io`] if the file exists but cannot be read.
    pub fn load(&self, folder: &str) -> Result<Option<Exercise>> {
        Ok(self.load_document(folder)?.map(|(exercise, _)| exercise))
    }

    /// Load the exercise document in `folder` together with its raw JSON
    /// object, keys in authored order.
    ///
    /// # Errors
    ///
    /// Same as [`ExerciseCatalog::load`]; a document that is not a JSON
    /// object is [`CatalogError::Malformed`].
    pub fn load_document(&self, folder: &str) -> Result<Option<(Exercise, Document)>> {
        let path = self.record_path(folder);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let parsed = serde_json::from_str::<Value>(&content).and_then(|value| {
            let exercise = Exercise::deserialize(&value)?;
            match value {
                Value::Object(document) => Ok((exercise, document)),
                _ => Err(serde::de::Error::custom("expected a JSON object")),
            }
        });
        parsed
            .map(Some)
            .map_err(|source| CatalogError::Malformed { path, source })
    }

    /// Find the first folder whose record is named exactly `name`.
    ///
    /// Folders with unreadable records are logged and passed over.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the root cannot be listed.
    pub fn find_by_name(&self, name: &str) -> Result<Option<(String, Exercise)>> {
        for folder in self.folders()? {
            match self.load(&folder) {
                Ok(Some(exercise)) if exercise.name == name => return Ok(Some((folder, exercise))),
                Ok(_) => {}
                Err(e) => warn!(folder = %folder, error = %e, "Unreadable exercise during lookup"),
            }
        }
        Ok(None)
    }

    /// Write `document` as pretty JSON to `folder/file_name`.
    ///
    /// Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Serialization`] or [`CatalogError::Io`].
    pub fn write_document(&self, folder: &str, file_name: &str, document: &Document) -> Result<PathBuf> {
        let path = self.root.join(folder).join(file_name);
        let json = serde_json::to_string_pretty(document)?;
        fs::write(&path, json)?;
        debug!(path = %path.display(), "Wrote exercise document");
        Ok(path)
    }
}

/// Set `trackingType` on a raw document, leaving every other key as authored.
pub fn set_tracking_type(document: &mut Document, tracking_type: TrackingType) {
    document.insert(
        TRACKING_TYPE_KEY.to_string(),
        Value::String(tracking_type.as_str().to_string()),
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
