use crate::analysis::is_orphan;
use crate::error::GraphError;
use crate::model::{Block, Connection};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Describes a retarget the orphan guard refused, for the editor to present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrphanConflict {
    /// The previous default target, which would be left with no connections.
    pub orphaned_block_id: String,
    pub connection_id: String,
    pub proposed_target_id: Option<String>,
}

impl fmt::Display for OrphanConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.proposed_target_id {
            Some(target) => write!(
                f,
                "Retargeting connection '{}' to '{}' would orphan block '{}'",
                self.connection_id, target, self.orphaned_block_id
            ),
            None => write!(
                f,
                "Clearing the default target of connection '{}' would orphan block '{}'",
                self.connection_id, self.orphaned_block_id
            ),
        }
    }
}

/// The result of a guarded retarget. When `applied` is false, `connections`
/// is the unchanged input and `conflict` says why.
#[derive(Debug, Clone)]
pub struct RetargetOutcome {
    pub applied: bool,
    pub connections: Vec<Connection>,
    pub conflict: Option<OrphanConflict>,
}

/// Changes a connection's default target, unless that would orphan the old target.
///
/// The change is simulated first. If the old target would end up with no
/// incoming default edge, no outgoing connection and no rule pointing at it,
/// the edit is rejected and reported instead of applied. Passing `None` clears
/// the default target under the same guard.
pub fn retarget(
    connection_id: &str,
    new_target_id: Option<&str>,
    blocks: &[Block],
    connections: &[Connection],
) -> Result<RetargetOutcome, GraphError> {
    let (position, old_target) = locate(connection_id, new_target_id, blocks, connections)?;

    if old_target.as_deref() == new_target_id {
        return Ok(RetargetOutcome {
            applied: true,
            connections: connections.to_vec(),
            conflict: None,
        });
    }

    let updated = apply(position, new_target_id, connections);
    if let Some(old) = old_target {
        if is_orphan(&old, &updated) {
            let conflict = OrphanConflict {
                orphaned_block_id: old,
                connection_id: connection_id.to_string(),
                proposed_target_id: new_target_id.map(str::to_string),
            };
            warn!(%conflict, "retarget rejected");
            return Ok(RetargetOutcome {
                applied: false,
                connections: connections.to_vec(),
                conflict: Some(conflict),
            });
        }
    }

    debug!(connection_id, new_target = ?new_target_id, "retarget applied");
    Ok(RetargetOutcome {
        applied: true,
        connections: updated,
        conflict: None,
    })
}

/// Applies a retarget without the orphan guard, for when the editor confirms it.
pub fn force_retarget(
    connection_id: &str,
    new_target_id: Option<&str>,
    blocks: &[Block],
    connections: &[Connection],
) -> Result<Vec<Connection>, GraphError> {
    let (position, _) = locate(connection_id, new_target_id, blocks, connections)?;
    Ok(apply(position, new_target_id, connections))
}

fn locate(
    connection_id: &str,
    new_target_id: Option<&str>,
    blocks: &[Block],
    connections: &[Connection],
) -> Result<(usize, Option<String>), GraphError> {
    let position = connections
        .iter()
        .position(|c| c.id == connection_id)
        .ok_or_else(|| GraphError::ConnectionNotFound(connection_id.to_string()))?;
    if let Some(target) = new_target_id {
        if !blocks.iter().any(|b| b.id == target) {
            return Err(GraphError::BlockNotFound(target.to_string()));
        }
    }
    Ok((position, connections[position].default_target_id.clone()))
}

fn apply(position: usize, new_target_id: Option<&str>, connections: &[Connection]) -> Vec<Connection> {
    let mut updated = connections.to_vec();
    let connection = &mut updated[position];
    connection.default_target_id = new_target_id.map(str::to_string);
    // A hand-edited edge is no longer the synchronizer's to replace.
    connection.is_explicit = true;
    updated
}
