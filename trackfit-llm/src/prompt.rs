//! Prompt templates for trackfit LLM operations.
//!
//! Templates use `{key}` placeholders filled by [`render_template`].

/// Tracking-type classification prompt.
///
/// Placeholders: `{name}`, `{primary_muscles}`, `{equipment}`, `{category}`,
/// `{force}`.
pub const TRACKING_TYPE_PROMPT: &str = r"Given this exercise data, return ONLY the tracking type enum.

Exercise: {name}
Primary Muscles: {primary_muscles}
Equipment: {equipment}
Category: {category}
Force: {force}

Valid tracking types:
- REPS_WEIGHT (exercises with external weight: barbells, dumbbells, machines, cables)
- REPS_BODYWEIGHT (bodyweight exercises counted by reps: pushups, pullups, dips)
- TIME (isometric holds or timed exercises: plank, wall sit, stretching)
- DISTANCE_TIME (cardio with distance/duration: running, rowing, cycling)

Rules:
- If equipment involves weights (barbell, dumbbell, machine, cable) → REPS_WEIGHT
- If category is 'cardio' → DISTANCE_TIME
- If category is 'stretching' → TIME
- If exercise name contains 'plank', 'hold', 'bridge' → TIME
- If equipment is 'body only' and not timed → REPS_BODYWEIGHT

Return only the enum value, no explanation.";

/// Simple template interpolation for prompts.
///
/// Replaces `{key}` with the corresponding value. Values are inserted as-is;
/// a value containing another placeholder is not expanded again.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replaced = after.find('}').and_then(|close| {
            let key = &after[..close];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (close, *v))
        });
        match replaced {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_placeholder() {
        let out = render_template(
            TRACKING_TYPE_PROMPT,
            &[
                ("name", "Plank"),
                ("primary_muscles", r#"["abdominals"]"#),
                ("equipment", "body only"),
                ("category", "stretching"),
                ("force", "static"),
            ],
        );
        assert!(out.contains("Exercise: Plank\n"));
        assert!(out.contains(r#"Primary Muscles: ["abdominals"]"#));
        assert!(out.contains("Equipment: body only\n"));
        assert!(out.contains("Category: stretching\n"));
        assert!(out.contains("Force: static\n"));
        assert!(!out.contains("{name}"));
        assert!(!out.contains("{force}"));
    }

    #[test]
    fn unknown_placeholders_are_left_alone() {
        assert_eq!(render_template("a {x} {y}", &[("x", "1")]), "a 1 {y}");
        assert_eq!(render_template("brace { only", &[]), "brace { only");
    }

    #[test]
    fn values_are_not_expanded_twice() {
        let out = render_template("{a}{b}", &[("a", "{b}"), ("b", "2")]);
        assert_eq!(out, "{b}2");
    }

    proptest::proptest! {
        #[test]
        fn rendered_values_appear_verbatim(name in "[^{}]{0,40}", force in "[^{}]{0,12}") {
            let out = render_template(TRACKING_TYPE_PROMPT, &[("name", name.as_str()), ("force", force.as_str())]);
            let exercise_line = format!("Exercise: {name}\n");
            let force_line = format!("Force: {force}\n");
            proptest::prop_assert!(out.contains(&exercise_line));
            proptest::prop_assert!(out.contains(&force_line));
            proptest::prop_assert!(out.contains("{equipment}"), "unfilled {{equipment}} placeholder missing");
        }
    }

    #[test]
    fn template_lists_all_four_labels() {
        for label in ["REPS_WEIGHT", "REPS_BODYWEIGHT", "TIME", "DISTANCE_TIME"] {
            assert!(TRACKING_TYPE_PROMPT.contains(label), "{label} missing");
        }
    }
}
