use crate::model::{Block, Connection};
use ahash::AHashMap;

mod cycles;
mod layout;
mod orphans;

pub use cycles::{CycleReport, detect_cycles};
pub use layout::compute_layout;
pub use orphans::{find_orphans, find_unreachable, is_orphan};

/// Maps block ids to their positions in the block slice.
pub(crate) struct BlockIndex<'a> {
    positions: AHashMap<&'a str, usize>,
    len: usize,
}

impl<'a> BlockIndex<'a> {
    pub(crate) fn new(blocks: &'a [Block]) -> Self {
        let mut positions = AHashMap::with_capacity(blocks.len());
        for (i, block) in blocks.iter().enumerate() {
            positions.entry(block.id.as_str()).or_insert(i);
        }
        Self {
            positions,
            len: blocks.len(),
        }
    }

    pub(crate) fn get(&self, block_id: &str) -> Option<usize> {
        self.positions.get(block_id).copied()
    }

    /// Outgoing edges per block as `(target index, connection id)`, default
    /// target first, then rule targets. Edges touching unknown blocks are dropped.
    pub(crate) fn adjacency<'c>(&self, connections: &'c [Connection]) -> Vec<Vec<(usize, &'c str)>> {
        let mut adjacency = vec![Vec::new(); self.len];
        for connection in connections {
            let Some(source) = self.get(&connection.source_id) else {
                continue;
            };
            for target in connection.targets() {
                if let Some(target) = self.get(target) {
                    adjacency[source].push((target, connection.id.as_str()));
                }
            }
        }
        adjacency
    }
}
