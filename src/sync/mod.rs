//! Keeps the connection list well-formed while an editor mutates blocks.
//!
//! Every entry point takes the graph by reference and returns a fresh
//! connection list; the caller decides whether to store it. Connections the
//! synchronizer creates are marked non-explicit, and explicit connections are
//! never removed or rewritten here except when a block they reference is gone.

use crate::model::{Block, Connection, sequential_order};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

mod retarget;
mod validate;

pub use retarget::{OrphanConflict, RetargetOutcome, force_retarget, retarget};
pub use validate::validate;

/// An editor change the synchronizer reacts to.
///
/// The block list handed to [`synchronize`] is the one *after* the change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GraphEvent {
    BlockAdded { block_id: String },
    BlockRemoved { block_id: String },
    /// Blocks received new `order_index` values.
    BlocksReordered,
}

/// Reacts to one editor event, then runs the validation pass.
pub fn synchronize(event: &GraphEvent, blocks: &[Block], connections: &[Connection]) -> Vec<Connection> {
    let updated = match event {
        GraphEvent::BlockAdded { block_id } => on_block_added(block_id, blocks, connections),
        GraphEvent::BlockRemoved { block_id } => on_block_removed(block_id, connections),
        GraphEvent::BlocksReordered => on_blocks_reordered(blocks, connections),
    };
    validate(blocks, &updated)
}

/// Links a new block to its predecessor when nothing else leads to it.
///
/// Only happens when the block is not first, has no incoming edge of any kind,
/// and the predecessor (by `order_index`) has no outgoing connection yet.
fn on_block_added(block_id: &str, blocks: &[Block], connections: &[Connection]) -> Vec<Connection> {
    let mut updated = connections.to_vec();
    let order = sequential_order(blocks);
    let Some(position) = order.iter().position(|&i| blocks[i].id == block_id) else {
        warn!(block_id, "added block is not in the block list");
        return updated;
    };
    if position == 0 || connections.iter().any(|c| c.points_to(block_id)) {
        return updated;
    }

    let predecessor = &blocks[order[position - 1]].id;
    if !has_outgoing(predecessor, connections) {
        let connection = Connection::sequential(predecessor, block_id, next_order_index(&updated));
        debug!(connection_id = %connection.id, "linking added block to its predecessor");
        updated.push(connection);
    }
    updated
}

/// Drops connections leaving or defaulting to the removed block and strips rules targeting it.
fn on_block_removed(block_id: &str, connections: &[Connection]) -> Vec<Connection> {
    connections
        .iter()
        .filter(|c| c.source_id != block_id && c.default_target_id.as_deref() != Some(block_id))
        .map(|c| {
            let mut connection = c.clone();
            connection.rules.retain(|r| r.target_block_id != block_id);
            connection
        })
        .collect()
}

/// Fills sequential gaps in the new order without touching existing edges.
fn on_blocks_reordered(blocks: &[Block], connections: &[Connection]) -> Vec<Connection> {
    let mut updated = connections.to_vec();
    for (prev, next) in sequential_order(blocks).into_iter().tuple_windows() {
        let (prev, next) = (&blocks[prev].id, &blocks[next].id);
        let linked = updated
            .iter()
            .any(|c| c.source_id == *prev && c.points_to(next));
        if linked || has_outgoing(prev, &updated) {
            continue;
        }
        let connection = Connection::sequential(prev, next, next_order_index(&updated));
        debug!(connection_id = %connection.id, "filling sequential gap after reorder");
        updated.push(connection);
    }
    updated
}

fn has_outgoing(block_id: &str, connections: &[Connection]) -> bool {
    connections.iter().any(|c| c.source_id == block_id)
}

fn next_order_index(connections: &[Connection]) -> i64 {
    connections
        .iter()
        .map(|c| c.order_index)
        .max()
        .map_or(0, |max| max + 1)
}
