//! Enrichment check runner.
//!
//! Classifies a small table of well-known exercises and compares the model's
//! answers with the expected labels. Each case ends in exactly one of pass,
//! fail, or not found; the run succeeds only when every case passes.

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};
use trackfit_core::catalog::ExerciseCatalog;
use trackfit_core::error::{CatalogError, Result};
use trackfit_core::types::TrackingType;

use crate::classify::Classifier;

/// One expected classification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckCase {
    /// Exact exercise name to look up.
    pub name: String,
    /// Label the model should return.
    pub expected: TrackingType,
}

impl CheckCase {
    /// Create a case.
    #[must_use]
    pub fn new(name: impl Into<String>, expected: TrackingType) -> Self {
        Self {
            name: name.into(),
            expected,
        }
    }
}

/// The built-in case table.
#[must_use]
pub fn default_cases() -> Vec<CheckCase> {
    vec![
        CheckCase::new("Barbell Squat", TrackingType::RepsWeight),
        CheckCase::new("Plank", TrackingType::Time),
        CheckCase::new("Push-Up", TrackingType::RepsBodyweight),
        CheckCase::new("3/4 Sit-Up", TrackingType::RepsBodyweight),
    ]
}

#[derive(Debug, Deserialize)]
struct CaseFile {
    #[serde(rename = "case", default)]
    cases: Vec<CheckCase>,
}

/// Load a case table from TOML:
///
/// ```toml
/// [[case]]
/// name = "Plank"
/// expected = "TIME"
/// ```
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the file cannot be read and
/// [`CatalogError::Config`] if it is not a valid table.
pub fn load_cases(path: &Path) -> Result<Vec<CheckCase>> {
    let content = std::fs::read_to_string(path)?;
    parse_cases(&content)
}

/// Parse a TOML case table.
///
/// # Errors
///
/// Returns [`CatalogError::Config`] on invalid TOML or unknown labels.
pub fn parse_cases(toml_str: &str) -> Result<Vec<CheckCase>> {
    let file: CaseFile = toml::from_str(toml_str).map_err(|e| CatalogError::Config(e.to_string()))?;
    Ok(file.cases)
}

/// How one case ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    /// The model returned the expected label.
    Pass,
    /// The record was found but the answer differed. `got` is `None` when
    /// the call itself failed.
    Fail {
        /// Expected label.
        expected: TrackingType,
        /// Trimmed answer, if any.
        got: Option<String>,
    },
    /// No folder holds a record with this name.
    NotFound,
}

/// Results of a check run.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    /// Per-case outcomes, in table order.
    pub outcomes: Vec<(String, CaseOutcome)>,
}

impl CheckReport {
    /// Cases that passed.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::Pass))
    }

    /// Cases found but answered wrongly.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::Fail { .. }))
    }

    /// Cases whose record was not found.
    #[must_use]
    pub fn not_found(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::NotFound))
    }

    /// True when nothing failed and nothing was missing.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.not_found() == 0
    }

    /// Process exit code: 0 on success, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.is_success())
    }

    fn count(&self, pred: impl Fn(&CaseOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Run every case against the catalog.
///
/// # Errors
///
/// Only fails when the catalog root cannot be listed.
pub async fn run_check(
    catalog: &ExerciseCatalog,
    classifier: &Classifier,
    cases: &[CheckCase],
) -> Result<CheckReport> {
    info!("Running {} test cases...", cases.len());
    let mut report = CheckReport::default();

    for case in cases {
        let Some((folder, exercise)) = catalog.find_by_name(&case.name)? else {
            error!("✗ NOT FOUND: {}", case.name);
            report.outcomes.push((case.name.clone(), CaseOutcome::NotFound));
            continue;
        };

        let got = match classifier.answer(&exercise).await {
            Ok(answer) => Some(answer),
            Err(e) => {
                error!(folder = %folder, "Error calling model: {e}");
                None
            }
        };

        let outcome = if got.as_deref() == Some(case.expected.as_str()) {
            info!("✓ PASS: {}", case.name);
            CaseOutcome::Pass
        } else {
            error!("✗ FAIL: {}", case.name);
            error!("  Expected: {}", case.expected);
            error!("  Got: {}", got.as_deref().unwrap_or("<no answer>"));
            CaseOutcome::Fail {
                expected: case.expected,
                got,
            }
        };
        report.outcomes.push((case.name.clone(), outcome));

        classifier.pace().await;
    }

    info!(
        "{} passed, {} failed, {} not found",
        report.passed(),
        report.failed(),
        report.not_found()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_known_exercises() {
        let cases = default_cases();
        assert_eq!(cases.len(), 4);
        assert_eq!(cases[0], CheckCase::new("Barbell Squat", TrackingType::RepsWeight));
        assert_eq!(cases[3].name, "3/4 Sit-Up");
    }

    #[test]
    fn parses_case_file() {
        let cases = parse_cases(
            r#"
            [[case]]
            name = "Running, Treadmill"
            expected = "DISTANCE_TIME"

            [[case]]
            name = "Wall Sit"
            expected = "TIME"
            "#,
        )
        .expect("parse");
        assert_eq!(
            cases,
            vec![
                CheckCase::new("Running, Treadmill", TrackingType::DistanceTime),
                CheckCase::new("Wall Sit", TrackingType::Time),
            ]
        );
    }

    #[test]
    fn unknown_label_in_case_file_is_rejected() {
        let err = parse_cases("[[case]]\nname = \"x\"\nexpected = \"REPS\"\n").expect_err("bad label");
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn report_counts_are_disjoint() {
        let report = CheckReport {
            outcomes: vec![
                ("a".into(), CaseOutcome::Pass),
                (
                    "b".into(),
                    CaseOutcome::Fail {
                        expected: TrackingType::Time,
                        got: Some("REPS_WEIGHT".into()),
                    },
                ),
                ("c".into(), CaseOutcome::NotFound),
            ],
        };
        assert_eq!((report.passed(), report.failed(), report.not_found()), (1, 1, 1));
        assert!(!report.is_success());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn all_pass_exits_zero() {
        let report = CheckReport {
            outcomes: vec![("a".into(), CaseOutcome::Pass)],
        };
        assert!(report.is_success());
        assert_eq!(report.exit_code(), 0);
    }
}
