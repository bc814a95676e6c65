//! Tracking-type classification for one exercise.
//!
//! Bridges `trackfit-core` records and the `trackfit-llm` client: renders the
//! classification prompt from a record, sends it, and checks the trimmed
//! answer against the four allowed labels.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};
use trackfit_core::config::LlmConfig;
use trackfit_core::types::{Exercise, TrackingType, non_empty};
use trackfit_llm::prompt::{TRACKING_TYPE_PROMPT, render_template};
use trackfit_llm::{LlmClient, LlmError, LlmRequest};

/// Why a record could not be classified.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The endpoint could not be reached or answered badly.
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The model answered with something outside the allow-list.
    #[error("Invalid tracking type returned: '{0}'")]
    Rejected(String),
}

/// Render the classification prompt for `exercise`.
///
/// Missing equipment, category or force render as `none`.
#[must_use]
pub fn build_prompt(exercise: &Exercise) -> String {
    let muscles = serde_json::to_string(&exercise.primary_muscles).unwrap_or_else(|_| "[]".into());
    render_template(
        TRACKING_TYPE_PROMPT,
        &[
            ("name", exercise.name.as_str()),
            ("primary_muscles", muscles.as_str()),
            ("equipment", or_none(exercise.equipment.as_deref())),
            ("category", or_none(exercise.category.as_deref())),
            ("force", or_none(exercise.force.as_deref())),
        ],
    )
}

fn or_none(value: Option<&str>) -> &str {
    non_empty(value).unwrap_or("none")
}

/// Check a raw model answer against the allow-list.
///
/// # Errors
///
/// Returns [`ClassifyError::Rejected`] with the trimmed answer when it is not
/// one of the four labels.
pub fn parse_answer(raw: &str) -> Result<TrackingType, ClassifyError> {
    let trimmed = raw.trim();
    trimmed
        .parse()
        .map_err(|_| ClassifyError::Rejected(trimmed.to_string()))
}

/// Sends classification prompts to the configured endpoint, one at a time.
#[derive(Debug, Clone)]
pub struct Classifier {
    client: LlmClient,
    timeout_ms: u64,
    delay: Duration,
}

impl Classifier {
    /// Create a classifier around an existing client.
    #[must_use]
    pub fn new(client: LlmClient, timeout_ms: u64, delay: Duration) -> Self {
        Self {
            client,
            timeout_ms,
            delay,
        }
    }

    /// Build a classifier from the `[llm]` config section.
    #[must_use]
    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(
            LlmClient::new(&config.base_url, &config.model),
            config.request_timeout_ms,
            Duration::from_millis(config.request_delay_ms),
        )
    }

    /// The underlying client.
    #[must_use]
    pub fn client(&self) -> &LlmClient {
        &self.client
    }

    /// Ask the model and return its answer, trimmed but not validated.
    ///
    /// # Errors
    ///
    /// Returns the client error when the call fails.
    pub async fn answer(&self, exercise: &Exercise) -> Result<String, LlmError> {
        let request = LlmRequest::deterministic(build_prompt(exercise)).with_timeout(self.timeout_ms);
        let response = self.client.generate(&request).await?;
        debug!(
            exercise = %exercise.name,
            answer = %response.text.trim(),
            model = %response.model,
            tokens = response.tokens_generated,
            latency_ms = response.latency_ms,
            "Model answered"
        );
        Ok(response.text.trim().to_string())
    }

    /// Classify `exercise`, rejecting answers outside the allow-list.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Llm`] on transport failure and
    /// [`ClassifyError::Rejected`] for an invalid label.
    pub async fn classify(&self, exercise: &Exercise) -> Result<TrackingType, ClassifyError> {
        let answer = self.answer(exercise).await?;
        parse_answer(&answer).inspect_err(|e| {
            warn!(exercise = %exercise.name, "{e}");
        })
    }

    /// Wait the fixed inter-request delay.
    pub async fn pace(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(name: &str, equipment: Option<&str>, category: Option<&str>) -> Exercise {
        let mut ex = Exercise::named(name);
        ex.equipment = equipment.map(str::to_string);
        ex.category = category.map(str::to_string);
        ex
    }

    #[test]
    fn prompt_carries_weighted_equipment_rule() {
        let mut squat = exercise("Barbell Squat", Some("barbell"), Some("strength"));
        squat.primary_muscles = vec!["quadriceps".into()];
        squat.force = Some("push".into());
        let prompt = build_prompt(&squat);

        assert!(prompt.contains("Exercise: Barbell Squat\n"));
        assert!(prompt.contains(r#"Primary Muscles: ["quadriceps"]"#));
        assert!(prompt.contains("Equipment: barbell\n"));
        assert!(prompt.contains("Force: push\n"));
        assert!(prompt.contains("(barbell, dumbbell, machine, cable) → REPS_WEIGHT"));
    }

    #[test]
    fn prompt_carries_timed_rules_for_plank() {
        let prompt = build_prompt(&exercise("Plank", None, Some("stretching")));
        assert!(prompt.contains("Category: stretching\n"));
        assert!(prompt.contains("If category is 'stretching' → TIME"));
        assert!(prompt.contains("'plank', 'hold', 'bridge' → TIME"));
    }

    #[test]
    fn prompt_carries_bodyweight_rule() {
        let prompt = build_prompt(&exercise("Push-Up", Some("body only"), None));
        assert!(prompt.contains("Equipment: body only\n"));
        assert!(prompt.contains("If equipment is 'body only' and not timed → REPS_BODYWEIGHT"));
    }

    #[test]
    fn missing_fields_render_as_none() {
        let prompt = build_prompt(&exercise("Mystery", Some(""), None));
        assert!(prompt.contains("Primary Muscles: []\n"));
        assert!(prompt.contains("Equipment: none\n"));
        assert!(prompt.contains("Category: none\n"));
        assert!(prompt.contains("Force: none\n"));
    }

    #[test]
    fn answers_are_trimmed_then_checked() {
        assert_eq!(parse_answer(" REPS_WEIGHT\n").expect("valid"), TrackingType::RepsWeight);
        assert_eq!(parse_answer("TIME").expect("valid"), TrackingType::Time);
        assert!(matches!(parse_answer("time"), Err(ClassifyError::Rejected(s)) if s == "time"));
        assert!(matches!(
            parse_answer("REPS_WEIGHT because barbell"),
            Err(ClassifyError::Rejected(_))
        ));
        assert!(matches!(parse_answer("   "), Err(ClassifyError::Rejected(s)) if s.is_empty()));
    }
}
