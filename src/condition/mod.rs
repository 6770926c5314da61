use crate::config::ConditionPolicy;
use crate::model::{
    Answer, Block, BlockSubtype, ConditionField, ConditionGroup, ConditionRule, LogicalOperator,
};
use tracing::warn;

mod compare;
mod options;

/// Evaluates conditions against the answer given to the block being left.
///
/// The evaluator borrows the block list so that conditions on option-bearing
/// blocks can translate option identifiers into labels. It holds no other
/// state and can be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct ConditionEvaluator<'a> {
    blocks: &'a [Block],
    policy: ConditionPolicy,
}

impl<'a> ConditionEvaluator<'a> {
    pub fn new(blocks: &'a [Block]) -> Self {
        Self {
            blocks,
            policy: ConditionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ConditionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ConditionPolicy {
        self.policy
    }

    /// Evaluates one atomic condition.
    ///
    /// A missing answer never satisfies a condition. Conditions that fit none of
    /// the recognized shapes fall back to the configured [`ConditionPolicy`].
    pub fn evaluate(
        &self,
        condition: &ConditionRule,
        answer: Option<&Answer>,
        subtype: BlockSubtype,
    ) -> bool {
        let Some(answer) = answer else {
            return false;
        };
        match self.classify(condition, answer, subtype) {
            Some(outcome) => outcome,
            None => self.unclassified(condition, subtype),
        }
    }

    /// Evaluates a whole group. An empty group passes regardless of its operator.
    pub fn evaluate_group(
        &self,
        group: &ConditionGroup,
        answer: Option<&Answer>,
        subtype: BlockSubtype,
    ) -> bool {
        if group.conditions.is_empty() {
            return true;
        }
        let mut results = group
            .conditions
            .iter()
            .map(|c| self.evaluate(c, answer, subtype));
        match group.logical_operator {
            LogicalOperator::And => results.all(|r| r),
            LogicalOperator::Or => results.any(|r| r),
        }
    }

    fn classify(
        &self,
        condition: &ConditionRule,
        answer: &Answer,
        subtype: BlockSubtype,
    ) -> Option<bool> {
        let op = condition.operator;
        let value = &condition.value;
        match (&condition.field, subtype) {
            (
                ConditionField::Block(source_id),
                BlockSubtype::MultipleChoice | BlockSubtype::Dropdown,
            ) => options::single_select(self.blocks, source_id, answer, op, value),
            (ConditionField::Block(source_id), BlockSubtype::CheckboxGroup) => {
                options::checkbox_group(self.blocks, source_id, answer, op, value)
            }
            (ConditionField::Choice(choice), _) => compare::choice_membership(answer, choice, op),
            (ConditionField::Selected, _) => compare::presence(answer, op, value),
            (ConditionField::Answer, _) => Some(compare::plain_answer(answer, op, value)),
            (
                ConditionField::Block(_),
                BlockSubtype::ShortText
                | BlockSubtype::LongText
                | BlockSubtype::Email
                | BlockSubtype::Number
                | BlockSubtype::Date
                | BlockSubtype::Rating
                | BlockSubtype::DynamicAi
                | BlockSubtype::Statement
                | BlockSubtype::Unknown,
            ) => None,
        }
    }

    fn unclassified(&self, condition: &ConditionRule, subtype: BlockSubtype) -> bool {
        let passes = self.policy == ConditionPolicy::Permissive;
        warn!(
            field = %condition.field,
            operator = condition.operator.symbol(),
            subtype = ?subtype,
            passes,
            "condition could not be classified"
        );
        passes
    }
}

/// Evaluates one condition with the default (permissive) policy.
pub fn evaluate_condition(
    condition: &ConditionRule,
    answer: Option<&Answer>,
    subtype: BlockSubtype,
    blocks: &[Block],
) -> bool {
    ConditionEvaluator::new(blocks).evaluate(condition, answer, subtype)
}

/// Evaluates a condition group with the default (permissive) policy.
pub fn evaluate_group(
    group: &ConditionGroup,
    answer: Option<&Answer>,
    subtype: BlockSubtype,
    blocks: &[Block],
) -> bool {
    ConditionEvaluator::new(blocks).evaluate_group(group, answer, subtype)
}
