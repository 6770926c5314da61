use super::BlockIndex;
use crate::model::{Block, Connection};
use ahash::AHashMap;
use serde::Serialize;
use tracing::debug;

/// Which connections take part in at least one cycle.
///
/// Every connection of the analysed graph has an entry, so the editor canvas
/// can look any edge up directly. Recomputed on demand; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub cycle_connections: AHashMap<String, bool>,
    pub has_cycles: bool,
}

impl CycleReport {
    pub fn contains(&self, connection_id: &str) -> bool {
        self.cycle_connections
            .get(connection_id)
            .copied()
            .unwrap_or(false)
    }

    /// Ids of the connections on a cycle, sorted.
    pub fn connection_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .cycle_connections
            .iter()
            .filter(|(_, in_cycle)| **in_cycle)
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    Unvisited,
    OnPath,
    Done,
}

/// Flags connections that can lead a respondent back to a block already on their path.
///
/// Both default targets and rule targets count as edges, so a connection can
/// be a cycle member through either. Depth-first search runs from every
/// unvisited block in block order. When an edge re-enters a block on the
/// current path, every connection from that block to the edge is marked.
/// Finished blocks are never entered again, which keeps the walk linear.
///
/// Cycles are a report, not an error: a cyclic form only loops if the
/// respondent's answers keep satisfying the looping condition.
pub fn detect_cycles(blocks: &[Block], connections: &[Connection]) -> CycleReport {
    let index = BlockIndex::new(blocks);
    let adjacency = index.adjacency(connections);

    let mut cycle_connections: AHashMap<String, bool> = connections
        .iter()
        .map(|c| (c.id.clone(), false))
        .collect();

    let mut colors = vec![Color::Unvisited; blocks.len()];
    let mut depth = vec![0usize; blocks.len()];

    for start in 0..blocks.len() {
        if colors[start] != Color::Unvisited {
            continue;
        }
        // (block, next edge to try); path_edges[k] leads from stack[k] to stack[k + 1].
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        let mut path_edges: Vec<&str> = Vec::new();
        colors[start] = Color::OnPath;

        while let Some(top) = stack.len().checked_sub(1) {
            let (node, next) = stack[top];
            match adjacency[node].get(next) {
                Some(&(target, connection_id)) => {
                    stack[top].1 += 1;
                    match colors[target] {
                        Color::OnPath => {
                            for id in path_edges[depth[target]..]
                                .iter()
                                .copied()
                                .chain(std::iter::once(connection_id))
                            {
                                cycle_connections.insert(id.to_string(), true);
                            }
                        }
                        Color::Unvisited => {
                            colors[target] = Color::OnPath;
                            depth[target] = stack.len();
                            stack.push((target, 0));
                            path_edges.push(connection_id);
                        }
                        Color::Done => {}
                    }
                }
                None => {
                    colors[node] = Color::Done;
                    stack.pop();
                    path_edges.pop();
                }
            }
        }
    }

    let has_cycles = cycle_connections.values().any(|v| *v);
    debug!(
        has_cycles,
        members = cycle_connections.values().filter(|v| **v).count(),
        "cycle detection finished"
    );
    CycleReport {
        cycle_connections,
        has_cycles,
    }
}
