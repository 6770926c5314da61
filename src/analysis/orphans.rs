use super::BlockIndex;
use crate::model::{Block, Connection, sequential_order};
use std::collections::VecDeque;

/// A block is an orphan when no connection enters it by default target, none
/// leaves it, and no rule anywhere points at it.
pub fn is_orphan(block_id: &str, connections: &[Connection]) -> bool {
    !connections.iter().any(|c| {
        c.source_id == block_id
            || c.default_target_id.as_deref() == Some(block_id)
            || c.rules.iter().any(|r| r.target_block_id == block_id)
    })
}

/// Ids of every orphan block, in block order.
pub fn find_orphans(blocks: &[Block], connections: &[Connection]) -> Vec<String> {
    blocks
        .iter()
        .filter(|b| is_orphan(&b.id, connections))
        .map(|b| b.id.clone())
        .collect()
}

/// Ids of blocks no respondent can reach from the first block, in block order.
///
/// Walks connection edges (default and rule targets) and, for blocks without
/// any outgoing connection, the sequential fallback, exactly as the resolver
/// would allow.
pub fn find_unreachable(blocks: &[Block], connections: &[Connection]) -> Vec<String> {
    let order = sequential_order(blocks);
    let Some(&first) = order.first() else {
        return Vec::new();
    };
    let index = BlockIndex::new(blocks);
    let adjacency = index.adjacency(connections);

    let mut has_outgoing = vec![false; blocks.len()];
    for connection in connections {
        if let Some(source) = index.get(&connection.source_id) {
            has_outgoing[source] = true;
        }
    }
    let mut next_in_order = vec![None; blocks.len()];
    for pair in order.windows(2) {
        next_in_order[pair[0]] = Some(pair[1]);
    }

    let mut reached = vec![false; blocks.len()];
    let mut queue = VecDeque::from([first]);
    reached[first] = true;
    while let Some(node) = queue.pop_front() {
        let sequential = (!has_outgoing[node])
            .then_some(next_in_order[node])
            .flatten();
        let targets = adjacency[node]
            .iter()
            .map(|(target, _)| *target)
            .chain(sequential);
        for target in targets {
            if !reached[target] {
                reached[target] = true;
                queue.push_back(target);
            }
        }
    }

    blocks
        .iter()
        .zip(reached)
        .filter(|(_, reached)| !reached)
        .map(|(b, _)| b.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockSubtype, Rule};

    fn blocks(ids: &[&str]) -> Vec<Block> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| Block::new(*id, BlockSubtype::ShortText, i as i64))
            .collect()
    }

    #[test]
    fn rule_reference_keeps_block_attached() {
        let connections = vec![Connection::explicit("c1", "a", None).with_rule(Rule::new("r1", "c"))];
        assert!(!is_orphan("c", &connections));
        assert!(!is_orphan("a", &connections));
        assert!(is_orphan("b", &connections));
    }

    #[test]
    fn sequential_fallback_counts_as_reachable() {
        let blocks = blocks(&["a", "b", "c", "d"]);
        // a jumps straight to c; b is skipped, c has no connections so d follows sequentially.
        let connections = vec![Connection::explicit("c1", "a", Some("c"))];
        assert_eq!(find_unreachable(&blocks, &connections), vec!["b".to_string()]);
    }
}
