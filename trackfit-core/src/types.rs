//! Core type definitions for exercise records.
//!
//! An [`Exercise`] mirrors the on-disk `exercise.json` document. Keys the
//! record does not model (image lists, external ids) are carried in
//! [`Exercise::extra`] so a rewritten file keeps them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Tracking type
// ---------------------------------------------------------------------------

/// How a user logs sets for an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackingType {
    /// Repetitions against an external load.
    RepsWeight,
    /// Repetitions with body weight only.
    RepsBodyweight,
    /// Elapsed time (holds, stretches).
    Time,
    /// Distance covered over a duration (cardio).
    DistanceTime,
}

impl TrackingType {
    /// Every allowed tracking type, in prompt order.
    pub const ALL: [TrackingType; 4] = [
        Self::RepsWeight,
        Self::RepsBodyweight,
        Self::Time,
        Self::DistanceTime,
    ];

    /// Wire label, e.g. `REPS_WEIGHT`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RepsWeight => "REPS_WEIGHT",
            Self::RepsBodyweight => "REPS_BODYWEIGHT",
            Self::Time => "TIME",
            Self::DistanceTime => "DISTANCE_TIME",
        }
    }
}

impl fmt::Display for TrackingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackingType {
    type Err = String;

    /// Exact match against the four labels. Callers trim first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown tracking type: '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Exercise record
// ---------------------------------------------------------------------------

/// One exercise as described by its JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Unique exercise name; the upsert key.
    pub name: String,
    /// Push / pull / static.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force: Option<String>,
    /// Beginner / intermediate / expert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Compound / isolation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanic: Option<String>,
    /// Equipment used, e.g. `barbell`, `body only`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    /// Primary muscles, in authored order.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub primary_muscles: Vec<String>,
    /// Secondary muscles, in authored order.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub secondary_muscles: Vec<String>,
    /// Instruction paragraphs, in authored order.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub instructions: Vec<String>,
    /// Strength / stretching / cardio / ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Keys not modelled above, kept for round-tripping.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
    /// Classification written by the enricher. A label outside the four
    /// known ones reads as `None`.
    #[serde(
        default,
        deserialize_with = "known_tracking_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub tracking_type: Option<TrackingType>,
}

impl Exercise {
    /// Create a record with only a name set.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            force: None,
            level: None,
            mechanic: None,
            equipment: None,
            primary_muscles: Vec::new(),
            secondary_muscles: Vec::new(),
            instructions: Vec::new(),
            category: None,
            extra: serde_json::Map::new(),
            tracking_type: None,
        }
    }

    /// Instructions as a single text block, or `None` when there are none.
    #[must_use]
    pub fn instructions_text(&self) -> Option<String> {
        flatten_instructions(&self.instructions)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn known_tracking_type<'de, D>(deserializer: D) -> Result<Option<TrackingType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|label| label.parse().ok()))
}

/// Join instruction paragraphs with a blank line between each.
///
/// An empty list yields `None` so it is stored as NULL.
#[must_use]
pub fn flatten_instructions(paragraphs: &[String]) -> Option<String> {
    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs.join("\n\n"))
    }
}

/// Map empty strings to `None`.
#[must_use]
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
