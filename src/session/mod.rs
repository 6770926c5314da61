use crate::config::ConditionPolicy;
use crate::error::NavigationError;
use crate::model::{Answer, Block, Connection, sequential_order};
use crate::resolver::{NextBlockResolver, Resolution};
use crate::trace::PathStep;
use ahash::AHashMap;
use serde::Serialize;

/// Which way the respondent last moved. Only used for transition styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// The result of a successful advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved { index: usize },
    Completed,
}

/// A respondent's walk through one form.
///
/// Holds the current position, the answers given so far and a browser-like
/// history stack: going back and then answering differently discards the stale
/// forward history. Every decision about where to go is delegated to the
/// [`NextBlockResolver`]; the session never guesses.
#[derive(Debug, Clone)]
pub struct NavigationSession<'a> {
    blocks: &'a [Block],
    resolver: NextBlockResolver<'a>,
    initial_index: usize,
    current_index: usize,
    history: Vec<usize>,
    history_index: usize,
    answers: AHashMap<String, Answer>,
    direction: Direction,
    complete: bool,
    path: Vec<PathStep>,
}

impl<'a> NavigationSession<'a> {
    /// Starts at the first block by `order_index`.
    pub fn new(blocks: &'a [Block], connections: &'a [Connection]) -> Result<Self, NavigationError> {
        let initial_index = *sequential_order(blocks)
            .first()
            .ok_or(NavigationError::EmptyForm)?;
        Ok(Self {
            blocks,
            resolver: NextBlockResolver::new(blocks, connections),
            initial_index,
            current_index: initial_index,
            history: vec![initial_index],
            history_index: 0,
            answers: AHashMap::new(),
            direction: Direction::Forward,
            complete: false,
            path: Vec::new(),
        })
    }

    pub fn with_policy(mut self, policy: ConditionPolicy) -> Self {
        self.resolver = self.resolver.with_policy(policy);
        self
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_block(&self) -> &'a Block {
        &self.blocks[self.current_index]
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Visited block indices, including forward history not yet discarded.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// The advisory trace of every resolution made so far.
    pub fn navigation_path(&self) -> &[PathStep] {
        &self.path
    }

    pub fn answers(&self) -> &AHashMap<String, Answer> {
        &self.answers
    }

    pub fn answer_for(&self, block_id: &str) -> Option<&Answer> {
        self.answers.get(block_id)
    }

    /// True when the current block has no outgoing connections.
    pub fn is_last_question(&self) -> bool {
        !self.resolver.has_outgoing(&self.current_block().id)
    }

    pub fn can_go_back(&self) -> bool {
        self.complete || self.history_index > 0
    }

    /// Records (or replaces) the answer for the current block without moving.
    pub fn set_answer(&mut self, answer: Answer) -> Result<(), NavigationError> {
        if self.complete {
            return Err(NavigationError::AlreadyComplete);
        }
        let block_id = self.current_block().id.clone();
        self.answers.insert(block_id, answer);
        Ok(())
    }

    /// Records the answer for the current block and advances.
    pub fn submit_answer(&mut self, answer: Answer) -> Result<Advance, NavigationError> {
        self.set_answer(answer)?;
        self.go_to_next()
    }

    /// Advances using the answer already stored for the current block.
    ///
    /// Fails without changing state when no answer is stored.
    pub fn go_to_next(&mut self) -> Result<Advance, NavigationError> {
        if self.complete {
            return Err(NavigationError::AlreadyComplete);
        }
        let block = self.current_block();
        let answer = self
            .answers
            .get(&block.id)
            .ok_or_else(|| NavigationError::MissingAnswer {
                block_id: block.id.clone(),
            })?;

        self.direction = Direction::Forward;
        match self.resolver.resolve(block, Some(answer)) {
            Resolution::Next { index, step } => {
                self.history.truncate(self.history_index + 1);
                self.history.push(index);
                self.history_index += 1;
                self.current_index = index;
                self.path.push(step);
                Ok(Advance::Moved { index })
            }
            Resolution::EndOfForm => {
                self.complete = true;
                Ok(Advance::Completed)
            }
        }
    }

    /// Steps back one entry in the history. From the completed state this
    /// reopens the last answered block. Returns false at the start.
    pub fn go_to_previous(&mut self) -> bool {
        if self.complete {
            self.complete = false;
        } else if self.history_index == 0 {
            return false;
        } else {
            self.history_index -= 1;
            self.current_index = self.history[self.history_index];
        }
        self.direction = Direction::Backward;
        true
    }

    /// Re-walks forward history left behind by [`go_to_previous`](Self::go_to_previous).
    pub fn go_to_forward(&mut self) -> bool {
        if self.complete || self.history_index + 1 >= self.history.len() {
            return false;
        }
        self.history_index += 1;
        self.current_index = self.history[self.history_index];
        self.direction = Direction::Forward;
        true
    }

    /// Back to the first block with no answers, history or trace.
    pub fn reset(&mut self) {
        self.current_index = self.initial_index;
        self.history = vec![self.initial_index];
        self.history_index = 0;
        self.answers.clear();
        self.direction = Direction::Forward;
        self.complete = false;
        self.path.clear();
    }
}
