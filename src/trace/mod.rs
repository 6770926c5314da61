use serde::{Deserialize, Serialize};
use std::fmt;

mod formatter;

pub use formatter::PathFormatter;

/// A record of one resolved hop through the form, kept for debugging branch logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub source_id: String,
    pub target_id: String,
    pub reason: StepReason,
}

/// Why the resolver picked a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepReason {
    RuleMatched {
        connection_id: String,
        rule_id: String,
    },
    DefaultTarget {
        connection_id: String,
    },
    /// The source block had no outgoing connections at all.
    Sequential,
}

impl fmt::Display for StepReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepReason::RuleMatched {
                connection_id,
                rule_id,
            } => write!(f, "rule {} on {}", rule_id, connection_id),
            StepReason::DefaultTarget { connection_id } => write!(f, "default of {}", connection_id),
            StepReason::Sequential => write!(f, "sequential"),
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.source_id, self.target_id, self.reason)
    }
}
