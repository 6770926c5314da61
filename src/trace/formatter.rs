use super::{PathStep, StepReason};
use itertools::Itertools;

/// Formats navigation paths into human-readable strings
pub struct PathFormatter;

impl PathFormatter {
    /// One `source -> target (reason)` line per step.
    pub fn format_path(steps: &[PathStep]) -> String {
        steps.iter().map(PathStep::to_string).join("\n")
    }

    /// The visited block ids as a single arrow chain, e.g. `a -> b -> d`.
    ///
    /// Consecutive steps that do not join up (after navigating back and taking
    /// another branch) restart the chain with ` | `.
    pub fn format_route(steps: &[PathStep]) -> String {
        let mut route = String::new();
        let mut last_target: Option<&str> = None;
        for step in steps {
            match last_target {
                Some(prev) if prev == step.source_id => {}
                Some(_) => route.push_str(&format!(" | {}", step.source_id)),
                None => route.push_str(&step.source_id),
            }
            route.push_str(&format!(" -> {}", step.target_id));
            last_target = Some(step.target_id.as_str());
        }
        route
    }

    /// Counts how often each kind of decision was taken, as `rules/defaults/sequential`.
    pub fn summarize(steps: &[PathStep]) -> String {
        let counts = steps.iter().counts_by(|s| match s.reason {
            StepReason::RuleMatched { .. } => "rule",
            StepReason::DefaultTarget { .. } => "default",
            StepReason::Sequential => "sequential",
        });
        let get = |key: &str| counts.get(key).copied().unwrap_or(0);
        format!(
            "{} rule, {} default, {} sequential",
            get("rule"),
            get("default"),
            get("sequential")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(source: &str, target: &str, reason: StepReason) -> PathStep {
        PathStep {
            source_id: source.to_string(),
            target_id: target.to_string(),
            reason,
        }
    }

    #[test]
    fn route_joins_and_restarts() {
        let steps = vec![
            step("a", "b", StepReason::Sequential),
            step("b", "c", StepReason::Sequential),
            step("a", "d", StepReason::Sequential),
        ];
        assert_eq!(PathFormatter::format_route(&steps), "a -> b -> c | a -> d");
    }

    #[test]
    fn path_lines_and_summary() {
        let steps = vec![
            step(
                "a",
                "b",
                StepReason::RuleMatched {
                    connection_id: "c1".to_string(),
                    rule_id: "r1".to_string(),
                },
            ),
            step(
                "b",
                "c",
                StepReason::DefaultTarget {
                    connection_id: "c2".to_string(),
                },
            ),
        ];
        assert_eq!(
            PathFormatter::format_path(&steps),
            "a -> b (rule r1 on c1)\nb -> c (default of c2)"
        );
        assert_eq!(
            PathFormatter::summarize(&steps),
            "1 rule, 1 default, 0 sequential"
        );
    }
}
