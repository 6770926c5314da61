use super::{Block, Connection, Position};
use crate::error::SnapshotError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;

/// The in-memory graph a loader hands to the engine and a saver takes back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub positions: AHashMap<String, Position>,
}

impl GraphSnapshot {
    pub fn new(blocks: Vec<Block>, connections: Vec<Connection>) -> Self {
        Self {
            blocks,
            connections,
            positions: AHashMap::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Parse(e.to_string()))
    }

    /// Load a snapshot from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path)
            .map_err(|e| SnapshotError::Io(format!("Could not read '{}': {}", path, e)))?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Parse(e.to_string()))
    }

    /// Write the snapshot as pretty-printed JSON.
    pub fn save(&self, path: &str) -> Result<(), SnapshotError> {
        let json = self.to_json()?;
        fs::write(path, json)
            .map_err(|e| SnapshotError::Io(format!("Could not write '{}': {}", path, e)))
    }
}
