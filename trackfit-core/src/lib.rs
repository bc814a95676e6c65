//! # trackfit core library
//!
//! Exercise records and the two places they live:
//!
//! - **Catalog**: a directory with one folder per exercise, each holding an
//!   `exercise.json` document ([`catalog::ExerciseCatalog`]).
//! - **Store**: a SQLite table keyed by exercise name, written with upsert
//!   semantics ([`store::ExerciseStore`]).
//!
//! Every record may carry a [`TrackingType`], the way a user logs sets for
//! that exercise.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use catalog::ExerciseCatalog;
pub use config::TrackfitConfig;
pub use error::CatalogError;
pub use store::{ExerciseStore, UpsertOutcome};
pub use types::{Exercise, TrackingType};
