//! SQLite store for imported exercises.
//!
//! One row per exercise, keyed by name:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS exercises (
//!     id                INTEGER PRIMARY KEY AUTOINCREMENT,
//!     name              TEXT NOT NULL UNIQUE,
//!     primary_muscles   TEXT NOT NULL,
//!     secondary_muscles TEXT NOT NULL,
//!     equipment         TEXT,
//!     category          TEXT,
//!     instructions      TEXT,
//!     force             TEXT,
//!     mechanic          TEXT,
//!     tracking_type     TEXT,
//!     created_at        TEXT NOT NULL,
//!     updated_at        TEXT NOT NULL
//! );
//! ```
//!
//! Muscle lists are stored as JSON arrays. The upsert only rewrites a row
//! when a column actually differs, so importing the same catalog twice
//! leaves every row (including `updated_at`) untouched.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use tracing::{debug, info};

use crate::error::Result;
use crate::types::{Exercise, TrackingType, non_empty};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS exercises (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    name              TEXT NOT NULL UNIQUE,
    primary_muscles   TEXT NOT NULL,
    secondary_muscles TEXT NOT NULL,
    equipment         TEXT,
    category          TEXT,
    instructions      TEXT,
    force             TEXT,
    mechanic          TEXT,
    tracking_type     TEXT,
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL
);";

// `tracking_type` only participates when the incoming record carries one, so
// importing an unclassified catalog never erases an earlier classification.
const UPSERT: &str = "INSERT INTO exercises (
        name, primary_muscles, secondary_muscles, equipment, category,
        instructions, force, mechanic, tracking_type, created_at, updated_at
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
    ON CONFLICT(name) DO UPDATE SET
        primary_muscles   = excluded.primary_muscles,
        secondary_muscles = excluded.secondary_muscles,
        equipment         = excluded.equipment,
        category          = excluded.category,
        instructions      = excluded.instructions,
        force             = excluded.force,
        mechanic          = excluded.mechanic,
        tracking_type     = COALESCE(excluded.tracking_type, exercises.tracking_type),
        updated_at        = excluded.updated_at
    WHERE exercises.primary_muscles   IS NOT excluded.primary_muscles
       OR exercises.secondary_muscles IS NOT excluded.secondary_muscles
       OR exercises.equipment         IS NOT excluded.equipment
       OR exercises.category          IS NOT excluded.category
       OR exercises.instructions      IS NOT excluded.instructions
       OR exercises.force             IS NOT excluded.force
       OR exercises.mechanic          IS NOT excluded.mechanic
       OR (excluded.tracking_type IS NOT NULL
           AND exercises.tracking_type IS NOT excluded.tracking_type)";

/// What an upsert did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new row was created.
    Inserted,
    /// An existing row had at least one differing column.
    Updated,
    /// The row already matched the record.
    Unchanged,
}

/// A row read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredExercise {
    /// Row id.
    pub id: i64,
    /// Unique exercise name.
    pub name: String,
    /// Primary muscles.
    pub primary_muscles: Vec<String>,
    /// Secondary muscles.
    pub secondary_muscles: Vec<String>,
    /// Equipment, NULL when absent or empty.
    pub equipment: Option<String>,
    /// Category, NULL when absent or empty.
    pub category: Option<String>,
    /// Flattened instructions.
    pub instructions: Option<String>,
    /// Force, NULL when absent or empty.
    pub force: Option<String>,
    /// Mechanic, NULL when absent or empty.
    pub mechanic: Option<String>,
    /// Classification, if one was imported.
    pub tracking_type: Option<TrackingType>,
    /// RFC 3339 creation time.
    pub created_at: String,
    /// RFC 3339 time of the last effective change.
    pub updated_at: String,
}

// Column tuple read back by `ExerciseStore::get`.
type StoredRow = (
    i64,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    String,
    String,
);

/// Handle to an open SQLite database holding imported exercises.
///
/// # Usage
///
/// ```no_run
/// # use trackfit_core::store::ExerciseStore;
/// # use trackfit_core::types::Exercise;
/// let store = ExerciseStore::open("trackfit.db", true)?;
/// store.upsert(&Exercise::named("Plank"))?;
/// assert!(store.get("Plank")?.is_some());
/// # Ok::<(), trackfit_core::error::CatalogError>(())
/// ```
pub struct ExerciseStore {
    conn: Connection,
    db_path: PathBuf,
}

impl std::fmt::Debug for ExerciseStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExerciseStore")
            .field("db_path", &self.db_path)
            .finish_non_exhaustive()
    }
}

impl ExerciseStore {
    /// Open (or create) a database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::Database`] on SQLite failures.
    pub fn open<P: AsRef<Path>>(path: P, wal_mode: bool) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(&db_path, flags)?;

        if wal_mode {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
        conn.execute_batch(SCHEMA)?;

        info!(path = %db_path.display(), wal = wal_mode, "Exercise store opened");

        Ok(Self { conn, db_path })
    }

    /// Open an in-memory database (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::Database`] on SQLite failures.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            db_path: PathBuf::from(":memory:"),
        })
    }

    /// Insert or update the row named `exercise.name`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::Serialization`] if a muscle list cannot
    /// be encoded, or [`crate::CatalogError::Database`] on SQLite failures.
    pub fn upsert(&self, exercise: &Exercise) -> Result<UpsertOutcome> {
        let existed = self
            .conn
            .prepare_cached("SELECT 1 FROM exercises WHERE name = ?1")?
            .query_row(params![exercise.name], |_| Ok(()))
            .optional()?
            .is_some();

        let primary = serde_json::to_string(&exercise.primary_muscles)?;
        let secondary = serde_json::to_string(&exercise.secondary_muscles)?;
        let now = Utc::now().to_rfc3339();

        let changed = self.conn.prepare_cached(UPSERT)?.execute(params![
            exercise.name,
            primary,
            secondary,
            non_empty(exercise.equipment.as_deref()),
            non_empty(exercise.category.as_deref()),
            exercise.instructions_text(),
            non_empty(exercise.force.as_deref()),
            non_empty(exercise.mechanic.as_deref()),
            exercise.tracking_type.map(TrackingType::as_str),
            now,
        ])?;

        let outcome = match (existed, changed) {
            (false, _) => UpsertOutcome::Inserted,
            (true, 0) => UpsertOutcome::Unchanged,
            (true, _) => UpsertOutcome::Updated,
        };
        debug!(name = %exercise.name, ?outcome, "Upserted exercise");
        Ok(outcome)
    }

    /// Read the row named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::Database`] on SQLite failures, or
    /// [`crate::CatalogError::Serialization`] if a muscle column is corrupt.
    pub fn get(&self, name: &str) -> Result<Option<StoredExercise>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, name, primary_muscles, secondary_muscles, equipment, category,
                    instructions, force, mechanic, tracking_type, created_at, updated_at
             FROM exercises WHERE name = ?1",
        )?;

        let row: Option<StoredRow> = stmt
            .query_row(params![name], |r| {
                Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                    r.get(5)?,
                    r.get(6)?,
                    r.get(7)?,
                    r.get(8)?,
                    r.get(9)?,
                    r.get(10)?,
                    r.get(11)?,
                ))
            })
            .optional()?;

        let Some((
            id,
            name,
            primary,
            secondary,
            equipment,
            category,
            instructions,
            force,
            mechanic,
            tracking,
            created_at,
            updated_at,
        )) = row
        else {
            return Ok(None);
        };

        Ok(Some(StoredExercise {
            id,
            name,
            primary_muscles: serde_json::from_str(&primary)?,
            secondary_muscles: serde_json::from_str(&secondary)?,
            equipment,
            category,
            instructions,
            force,
            mechanic,
            tracking_type: tracking.and_then(|t| t.parse().ok()),
            created_at,
            updated_at,
        }))
    }

    /// Number of stored exercises.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::Database`] on SQLite failures.
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Return the path to the database file (or `:memory:`).
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
