use super::BlockIndex;
use crate::config::LayoutConfig;
use crate::model::{Block, Connection, Position, sequential_order};
use ahash::AHashMap;
use std::collections::VecDeque;

/// Places blocks on the editor canvas.
///
/// Columns are the breadth-first distance from the root blocks (those nothing
/// points at; the first block when every block has an incoming edge). Blocks
/// sharing a column are stacked top to bottom in discovery order. Blocks the
/// walk never reaches get one extra column after the deepest level.
///
/// Presentation only: navigation never looks at positions.
pub fn compute_layout(
    blocks: &[Block],
    connections: &[Connection],
    config: &LayoutConfig,
) -> AHashMap<String, Position> {
    let order = sequential_order(blocks);
    let index = BlockIndex::new(blocks);
    let adjacency = index.adjacency(connections);

    let mut has_incoming = vec![false; blocks.len()];
    for edges in &adjacency {
        for (target, _) in edges {
            has_incoming[*target] = true;
        }
    }

    let mut roots: Vec<usize> = order.iter().copied().filter(|&i| !has_incoming[i]).collect();
    if roots.is_empty() {
        roots.extend(order.first().copied());
    }

    let mut level: Vec<Option<usize>> = vec![None; blocks.len()];
    let mut queue: VecDeque<usize> = VecDeque::new();
    for root in roots {
        level[root] = Some(0);
        queue.push_back(root);
    }
    // Discovery order doubles as vertical order within a column.
    let mut discovered = Vec::with_capacity(blocks.len());
    while let Some(node) = queue.pop_front() {
        discovered.push(node);
        let next_level = level[node].map_or(0, |l| l + 1);
        for (target, _) in &adjacency[node] {
            if level[*target].is_none() {
                level[*target] = Some(next_level);
                queue.push_back(*target);
            }
        }
    }

    let overflow_column = level.iter().flatten().max().map_or(0, |deepest| deepest + 1);
    discovered.extend(order.iter().copied().filter(|&i| level[i].is_none()));

    let mut rows_used: AHashMap<usize, usize> = AHashMap::new();
    discovered
        .into_iter()
        .map(|i| {
            let column = level[i].unwrap_or(overflow_column);
            let row = rows_used.entry(column).or_insert(0);
            let position = Position {
                x: config.origin_x + column as f64 * config.column_spacing,
                y: config.origin_y + *row as f64 * config.row_spacing,
            };
            *row += 1;
            (blocks[i].id.clone(), position)
        })
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
    fn branches_share_a_column() {
        let blocks = blocks(&["a", "b", "c", "d"]);
        let connections = vec![
            Connection::explicit("c1", "a", Some("b")).with_rule(Rule::new("r1", "c")),
            Connection::explicit("c2", "b", Some("d")),
        ];
        let config = LayoutConfig::default();
        let layout = compute_layout(&blocks, &connections, &config);
        assert_eq!(layout["a"], Position { x: 0.0, y: 0.0 });
        assert_eq!(layout["b"], Position { x: 300.0, y: 0.0 });
        assert_eq!(layout["c"], Position { x: 300.0, y: 150.0 });
        assert_eq!(layout["d"], Position { x: 600.0, y: 0.0 });
    }

    #[test]
    fn fully_cyclic_graph_seeds_from_first_block() {
        let blocks = blocks(&["a", "b"]);
        let connections = vec![
            Connection::explicit("c1", "a", Some("b")),
            Connection::explicit("c2", "b", Some("a")),
        ];
        let layout = compute_layout(&blocks, &connections, &LayoutConfig::default());
        assert_eq!(layout["a"].x, 0.0);
        assert_eq!(layout["b"].x, 300.0);
    }

    #[test]
    fn unreached_blocks_go_to_an_extra_column() {
        let blocks = blocks(&["a", "b", "x", "y"]);
        let connections = vec![
            Connection::explicit("c1", "a", Some("b")),
            Connection::explicit("c2", "x", Some("y")),
            Connection::explicit("c3", "y", Some("x")),
        ];
        let layout = compute_layout(&blocks, &connections, &LayoutConfig::default());
        assert_eq!(layout["x"], Position { x: 600.0, y: 0.0 });
        assert_eq!(layout["y"], Position { x: 600.0, y: 150.0 });
    }
}
