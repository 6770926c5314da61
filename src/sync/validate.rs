use crate::model::{Block, Connection, EMPTY_TARGET};
use ahash::AHashSet;
use tracing::debug;

/// Drops every reference to a block that no longer exists.
///
/// Connections whose source or default target is gone are removed outright.
/// Rules pointing at a missing block are stripped from their connection, which
/// survives with the remaining rules. A rule holding the empty placeholder
/// target is kept: it is a slot the editor is still filling in.
pub fn validate(blocks: &[Block], connections: &[Connection]) -> Vec<Connection> {
    let known: AHashSet<&str> = blocks.iter().map(|b| b.id.as_str()).collect();

    connections
        .iter()
        .filter(|c| {
            let source_ok = known.contains(c.source_id.as_str());
            let default_ok = c
                .default_target_id
                .as_deref()
                .is_none_or(|t| known.contains(t));
            if !(source_ok && default_ok) {
                debug!(connection_id = %c.id, "pruning connection with a dangling endpoint");
            }
            source_ok && default_ok
        })
        .map(|c| {
            let mut connection = c.clone();
            connection.rules.retain(|r| {
                let keep = r.target_block_id == EMPTY_TARGET
                    || known.contains(r.target_block_id.as_str());
                if !keep {
                    debug!(connection_id = %c.id, rule_id = %r.id, "pruning rule with a dangling target");
                }
                keep
            });
            connection
        })
        .collect()
}
