//! # trackfit-cli: exercise catalog tools
//!
//! The three operations behind the binaries:
//!
//! - [`importer`] (`trackfit-seed`): upsert every catalog record into SQLite.
//! - [`enricher`] (`trackfit-enrich`): classify each record's tracking type
//!   with a local model and write it back to disk.
//! - [`check`] (`trackfit-enrich-check`): classify a table of known
//!   exercises and compare with expected labels.
//!
//! Each operation walks the catalog sequentially; the enricher and the check
//! runner pause after every model call.

pub mod args;
pub mod check;
pub mod classify;
pub mod enricher;
pub mod importer;
pub mod logging;

pub use classify::{Classifier, ClassifyError};
