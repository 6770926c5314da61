use crate::error::SnapshotError;
use serde::{Deserialize, Serialize};
use std::fs;

/// How the condition evaluator treats a condition it cannot classify.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionPolicy {
    /// Unclassified conditions pass (and are logged). Respondents are never blocked by a malformed rule.
    #[default]
    Permissive,
    /// Unclassified conditions fail, so a malformed rule never routes anyone.
    Strict,
}

/// Spacing used by auto-layout when placing blocks on the editor canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub column_spacing: f64,
    pub row_spacing: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            column_spacing: 300.0,
            row_spacing: 150.0,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }
}

/// Engine-wide settings. Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub condition_policy: ConditionPolicy,
    pub layout: LayoutConfig,
    /// Recompute canvas positions whenever the service's graph changes shape.
    pub auto_layout: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            condition_policy: ConditionPolicy::Permissive,
            layout: LayoutConfig::default(),
            auto_layout: true,
        }
    }
}

impl EngineConfig {
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Parse(e.to_string()))
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path)
            .map_err(|e| SnapshotError::Io(format!("Could not read '{}': {}", path, e)))?;
        Self::from_json(&content)
    }
}

#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn condition_policy(mut self, policy: ConditionPolicy) -> Self {
        self.config.condition_policy = policy;
        self
    }

    pub fn layout(mut self, layout: LayoutConfig) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn spacing(mut self, column_spacing: f64, row_spacing: f64) -> Self {
        self.config.layout.column_spacing = column_spacing;
        self.config.layout.row_spacing = row_spacing;
        self
    }

    pub fn auto_layout(mut self, enabled: bool) -> Self {
        self.config.auto_layout = enabled;
        self
    }

    pub fn build(self) -> EngineConfig {
        self.config
    }
}
