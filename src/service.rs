use crate::analysis::{self, CycleReport};
use crate::config::EngineConfig;
use crate::error::{GraphConversionError, GraphError, NavigationError};
use crate::model::{
    Answer, Block, Connection, GraphSnapshot, IntoGraph, Position, Rule, index_of,
};
use crate::resolver::{NextBlockResolver, Resolution};
use crate::session::NavigationSession;
use crate::sync::{self, GraphEvent, RetargetOutcome};
use ahash::{AHashMap, AHashSet};
use tracing::debug;

/// Owns one form's graph for the duration of an editor or respondent session.
///
/// Read-only questions (resolution, cycles, orphans, layout) are answered from
/// the current snapshot. Editor operations mutate it and then run the
/// synchronizer and validation pass, so the graph is well-formed after every
/// call. Persisting the result is up to the caller, via [`snapshot`](Self::snapshot).
#[derive(Debug, Clone)]
pub struct WorkflowGraphService {
    blocks: Vec<Block>,
    connections: Vec<Connection>,
    positions: AHashMap<String, Position>,
    config: EngineConfig,
}

impl WorkflowGraphService {
    pub fn new(snapshot: GraphSnapshot) -> Self {
        Self::with_config(snapshot, EngineConfig::default())
    }

    /// Loads a snapshot, pruning anything that references a missing block.
    ///
    /// With `auto_layout`, blocks the snapshot stored no position for are placed;
    /// stored positions are kept.
    pub fn with_config(snapshot: GraphSnapshot, config: EngineConfig) -> Self {
        let connections = sync::validate(&snapshot.blocks, &snapshot.connections);
        let mut service = Self {
            blocks: snapshot.blocks,
            connections,
            positions: snapshot.positions,
            config,
        };
        service.after_change();
        service
    }

    /// Builds a service from any format that knows how to become a graph.
    pub fn from_source<S: IntoGraph>(
        source: S,
        config: EngineConfig,
    ) -> Result<Self, GraphConversionError> {
        Ok(Self::with_config(source.into_graph()?, config))
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn positions(&self) -> &AHashMap<String, Position> {
        &self.positions
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn block(&self, block_id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    pub fn connection(&self, connection_id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == connection_id)
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            blocks: self.blocks.clone(),
            connections: self.connections.clone(),
            positions: self.positions.clone(),
        }
    }

    pub fn into_snapshot(self) -> GraphSnapshot {
        GraphSnapshot {
            blocks: self.blocks,
            connections: self.connections,
            positions: self.positions,
        }
    }

    // --- Respondent-time queries ---

    pub fn resolve_next(
        &self,
        block_id: &str,
        answer: Option<&Answer>,
    ) -> Result<Resolution, GraphError> {
        let block = self
            .block(block_id)
            .ok_or_else(|| GraphError::BlockNotFound(block_id.to_string()))?;
        Ok(self.resolver().resolve(block, answer))
    }

    /// Starts a respondent session over the current graph.
    pub fn session(&self) -> Result<NavigationSession<'_>, NavigationError> {
        Ok(NavigationSession::new(&self.blocks, &self.connections)?
            .with_policy(self.config.condition_policy))
    }

    fn resolver(&self) -> NextBlockResolver<'_> {
        NextBlockResolver::new(&self.blocks, &self.connections)
            .with_policy(self.config.condition_policy)
    }

    // --- Analysis ---

    pub fn detect_cycles(&self) -> CycleReport {
        analysis::detect_cycles(&self.blocks, &self.connections)
    }

    pub fn orphans(&self) -> Vec<String> {
        analysis::find_orphans(&self.blocks, &self.connections)
    }

    pub fn unreachable(&self) -> Vec<String> {
        analysis::find_unreachable(&self.blocks, &self.connections)
    }

    /// Computes a fresh layout without storing it.
    pub fn compute_layout(&self) -> AHashMap<String, Position> {
        analysis::compute_layout(&self.blocks, &self.connections, &self.config.layout)
    }

    /// Recomputes and stores canvas positions for every block, discarding
    /// stored ones.
    pub fn relayout(&mut self) -> &AHashMap<String, Position> {
        self.positions = self.compute_layout();
        &self.positions
    }

    // --- Editor operations ---

    pub fn add_block(&mut self, block: Block) -> Result<(), GraphError> {
        if self.block(&block.id).is_some() {
            return Err(GraphError::DuplicateBlock(block.id));
        }
        let event = GraphEvent::BlockAdded {
            block_id: block.id.clone(),
        };
        self.blocks.push(block);
        self.apply(&event);
        Ok(())
    }

    pub fn remove_block(&mut self, block_id: &str) -> Result<Block, GraphError> {
        let position = index_of(&self.blocks, block_id)
            .ok_or_else(|| GraphError::BlockNotFound(block_id.to_string()))?;
        let removed = self.blocks.remove(position);
        self.positions.remove(block_id);
        self.apply(&GraphEvent::BlockRemoved {
            block_id: block_id.to_string(),
        });
        Ok(removed)
    }

    /// Reorders blocks to match `ordered_ids`, which must name every block exactly once.
    pub fn reorder_blocks(&mut self, ordered_ids: &[&str]) -> Result<(), GraphError> {
        let unique: AHashSet<&str> = ordered_ids.iter().copied().collect();
        if unique.len() != ordered_ids.len() || ordered_ids.len() != self.blocks.len() {
            return Err(GraphError::InvalidReorder(format!(
                "expected {} distinct block ids, got {}",
                self.blocks.len(),
                ordered_ids.len()
            )));
        }

        let mut reordered = Vec::with_capacity(self.blocks.len());
        for (order_index, id) in ordered_ids.iter().enumerate() {
            let block = self
                .block(id)
                .ok_or_else(|| GraphError::BlockNotFound(id.to_string()))?;
            let mut block = block.clone();
            block.order_index = order_index as i64;
            reordered.push(block);
        }
        self.blocks = reordered;
        self.apply(&GraphEvent::BlocksReordered);
        Ok(())
    }

    /// Adds a user-authored connection.
    pub fn add_connection(&mut self, mut connection: Connection) -> Result<(), GraphError> {
        if self.connection(&connection.id).is_some() {
            return Err(GraphError::DuplicateConnection(connection.id));
        }
        self.require_block(&connection.source_id)?;
        if let Some(target) = &connection.default_target_id {
            self.require_block(target)?;
        }
        connection.is_explicit = true;
        self.connections.push(connection);
        self.revalidate();
        Ok(())
    }

    pub fn remove_connection(&mut self, connection_id: &str) -> Result<Connection, GraphError> {
        let position = self
            .connections
            .iter()
            .position(|c| c.id == connection_id)
            .ok_or_else(|| GraphError::ConnectionNotFound(connection_id.to_string()))?;
        let removed = self.connections.remove(position);
        self.revalidate();
        Ok(removed)
    }

    /// Appends a rule to a connection. The target may be the empty placeholder.
    pub fn add_rule(&mut self, connection_id: &str, rule: Rule) -> Result<(), GraphError> {
        if let Some(target) = rule.target() {
            self.require_block(target)?;
        }
        let connection = self.connection_mut(connection_id)?;
        connection.rules.push(rule);
        connection.is_explicit = true;
        self.revalidate();
        Ok(())
    }

    pub fn remove_rule(&mut self, connection_id: &str, rule_id: &str) -> Result<Rule, GraphError> {
        let connection = self.connection_mut(connection_id)?;
        let position = connection
            .rules
            .iter()
            .position(|r| r.id == rule_id)
            .ok_or_else(|| GraphError::RuleNotFound {
                connection_id: connection_id.to_string(),
                rule_id: rule_id.to_string(),
            })?;
        connection.is_explicit = true;
        let removed = connection.rules.remove(position);
        self.revalidate();
        Ok(removed)
    }

    /// Retargets a connection's default target under the orphan guard.
    ///
    /// A rejected edit leaves the graph untouched; the outcome carries the conflict.
    pub fn retarget(
        &mut self,
        connection_id: &str,
        new_target_id: Option<&str>,
    ) -> Result<RetargetOutcome, GraphError> {
        let outcome = sync::retarget(connection_id, new_target_id, &self.blocks, &self.connections)?;
        if outcome.applied {
            self.connections = outcome.connections.clone();
            self.revalidate();
        }
        Ok(outcome)
    }

    /// Retargets even when it orphans the previous target.
    pub fn force_retarget(
        &mut self,
        connection_id: &str,
        new_target_id: Option<&str>,
    ) -> Result<(), GraphError> {
        self.connections =
            sync::force_retarget(connection_id, new_target_id, &self.blocks, &self.connections)?;
        self.revalidate();
        Ok(())
    }

    fn apply(&mut self, event: &GraphEvent) {
        debug!(?event, "synchronizing graph");
        self.connections = sync::synchronize(event, &self.blocks, &self.connections);
        self.after_change();
    }

    fn revalidate(&mut self) {
        self.connections = sync::validate(&self.blocks, &self.connections);
        self.after_change();
    }

    /// Places blocks that have no position yet. Existing positions are never moved.
    fn after_change(&mut self) {
        if !self.config.auto_layout || self.blocks.iter().all(|b| self.positions.contains_key(&b.id)) {
            return;
        }
        for (block_id, position) in self.compute_layout() {
            self.positions.entry(block_id).or_insert(position);
        }
    }

    fn require_block(&self, block_id: &str) -> Result<(), GraphError> {
        match self.block(block_id) {
            Some(_) => Ok(()),
            None => Err(GraphError::BlockNotFound(block_id.to_string())),
        }
    }

    fn connection_mut(&mut self, connection_id: &str) -> Result<&mut Connection, GraphError> {
        self.connections
            .iter_mut()
            .find(|c| c.id == connection_id)
            .ok_or_else(|| GraphError::ConnectionNotFound(connection_id.to_string()))
    }
}
