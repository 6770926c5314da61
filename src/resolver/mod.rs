use crate::condition::ConditionEvaluator;
use crate::config::ConditionPolicy;
use crate::model::{Answer, Block, Connection, index_of, sequential_order};
use crate::trace::{PathStep, StepReason};
use tracing::{debug, warn};

/// The outcome of resolving where a respondent goes after answering a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Move to the block at `index` in the block slice.
    Next { index: usize, step: PathStep },
    /// No further block: the form is finished.
    EndOfForm,
}

impl Resolution {
    pub fn index(&self) -> Option<usize> {
        match self {
            Resolution::Next { index, .. } => Some(*index),
            Resolution::EndOfForm => None,
        }
    }

    pub fn step(&self) -> Option<&PathStep> {
        match self {
            Resolution::Next { step, .. } => Some(step),
            Resolution::EndOfForm => None,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Resolution::EndOfForm)
    }
}

/// Picks the next block from the outgoing connections of the current one.
///
/// Precedence, highest first:
///
/// 1. Connections leaving the block, in stored array order (not `order_index`).
/// 2. Within a connection, its rules in array order; the first rule whose
///    condition group passes and whose target exists wins.
/// 3. The connection's default target.
///
/// Only a block with no outgoing connections at all falls back to the next
/// block by `order_index`. A block whose connections all fail to resolve ends
/// the form: that is a deliberately dead-ended branch.
#[derive(Debug, Clone, Copy)]
pub struct NextBlockResolver<'a> {
    blocks: &'a [Block],
    connections: &'a [Connection],
    evaluator: ConditionEvaluator<'a>,
}

impl<'a> NextBlockResolver<'a> {
    pub fn new(blocks: &'a [Block], connections: &'a [Connection]) -> Self {
        Self {
            blocks,
            connections,
            evaluator: ConditionEvaluator::new(blocks),
        }
    }

    pub fn with_policy(mut self, policy: ConditionPolicy) -> Self {
        self.evaluator = self.evaluator.with_policy(policy);
        self
    }

    pub fn has_outgoing(&self, block_id: &str) -> bool {
        self.connections.iter().any(|c| c.source_id == block_id)
    }

    pub fn resolve(&self, current: &Block, answer: Option<&Answer>) -> Resolution {
        let mut outgoing = self
            .connections
            .iter()
            .filter(|c| c.source_id == current.id)
            .peekable();

        if outgoing.peek().is_none() {
            return match self.sequential_next(&current.id) {
                Some(index) => self.advance(current, index, StepReason::Sequential),
                None => {
                    debug!(block_id = %current.id, "no outgoing connections and no later block");
                    Resolution::EndOfForm
                }
            };
        }

        for connection in outgoing {
            for rule in &connection.rules {
                if !self
                    .evaluator
                    .evaluate_group(&rule.condition_group, answer, current.subtype)
                {
                    continue;
                }
                match self.lookup(&rule.target_block_id) {
                    Some(index) => {
                        let reason = StepReason::RuleMatched {
                            connection_id: connection.id.clone(),
                            rule_id: rule.id.clone(),
                        };
                        return self.advance(current, index, reason);
                    }
                    None => warn!(
                        connection_id = %connection.id,
                        rule_id = %rule.id,
                        target = %rule.target_block_id,
                        "matching rule points at a block that does not exist"
                    ),
                }
            }

            if let Some(target) = &connection.default_target_id {
                match self.lookup(target) {
                    Some(index) => {
                        let reason = StepReason::DefaultTarget {
                            connection_id: connection.id.clone(),
                        };
                        return self.advance(current, index, reason);
                    }
                    None => warn!(
                        connection_id = %connection.id,
                        target = %target,
                        "default target does not exist"
                    ),
                }
            }
        }

        debug!(block_id = %current.id, "no outgoing connection resolved; ending form");
        Resolution::EndOfForm
    }

    /// The block after `block_id` by `order_index`, if any.
    pub fn sequential_next(&self, block_id: &str) -> Option<usize> {
        let order = sequential_order(self.blocks);
        let position = order.iter().position(|&i| self.blocks[i].id == block_id)?;
        order.get(position + 1).copied()
    }

    fn lookup(&self, block_id: &str) -> Option<usize> {
        if block_id.is_empty() {
            return None;
        }
        index_of(self.blocks, block_id)
    }

    fn advance(&self, current: &Block, index: usize, reason: StepReason) -> Resolution {
        let step = PathStep {
            source_id: current.id.clone(),
            target_id: self.blocks[index].id.clone(),
            reason,
        };
        debug!(step = %step, "resolved next block");
        Resolution::Next { index, step }
    }
}

/// Resolves the next block with the default (permissive) condition policy.
pub fn resolve_next(
    current: &Block,
    answer: Option<&Answer>,
    blocks: &[Block],
    connections: &[Connection],
) -> Resolution {
    NextBlockResolver::new(blocks, connections).resolve(current, answer)
}
