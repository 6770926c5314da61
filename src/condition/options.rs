//! Conditions on option-bearing blocks, where the answer holds option
//! identifiers that must be resolved to labels on the source block.

use crate::model::{Answer, Block, ConditionOperator, ConditionValue};
use tracing::{debug, warn};

/// Single-select and dropdown blocks: the answer is one option id.
///
/// Returns `None` when the answer is not an option id at all, leaving the
/// condition unclassified.
pub(super) fn single_select(
    blocks: &[Block],
    source_id: &str,
    answer: &Answer,
    op: ConditionOperator,
    value: &ConditionValue,
) -> Option<bool> {
    let option_id = answer.as_text()?;
    let Some(source) = blocks.iter().find(|b| b.id == source_id) else {
        warn!(source_id, "condition references a source block that does not exist");
        return Some(false);
    };
    let Some(option) = source.option(option_id) else {
        warn!(
            source_id,
            option_id, "answer does not match any option of the source block"
        );
        return Some(false);
    };

    let expected = value.to_string();
    match op {
        ConditionOperator::Equals => Some(option.label == expected),
        ConditionOperator::NotEquals => Some(option.label != expected),
        ConditionOperator::Contains => Some(option.label.contains(&expected)),
        ConditionOperator::GreaterThan | ConditionOperator::LessThan => None,
    }
}

/// Checkbox groups: the answer lists every selected option id.
///
/// `equals` passes when any selected label matches, `not_equals` only when none does.
pub(super) fn checkbox_group(
    blocks: &[Block],
    source_id: &str,
    answer: &Answer,
    op: ConditionOperator,
    value: &ConditionValue,
) -> Option<bool> {
    let selected: Vec<&str> = match answer {
        Answer::List(items) => items.iter().map(String::as_str).collect(),
        Answer::Text(single) => vec![single.as_str()],
        _ => return None,
    };
    let Some(source) = blocks.iter().find(|b| b.id == source_id) else {
        warn!(source_id, "condition references a source block that does not exist");
        return Some(false);
    };

    let labels: Vec<&str> = selected
        .iter()
        .filter_map(|id| match source.option(id) {
            Some(option) => Some(option.label.as_str()),
            None => {
                debug!(source_id, option_id = id, "ignoring unknown selected option");
                None
            }
        })
        .collect();

    let expected = value.to_string();
    let any_match = labels.iter().any(|label| *label == expected);
    match op {
        ConditionOperator::Equals => Some(any_match),
        ConditionOperator::NotEquals => Some(!any_match),
        ConditionOperator::Contains => Some(labels.iter().any(|label| label.contains(&expected))),
        ConditionOperator::GreaterThan | ConditionOperator::LessThan => None,
    }
}
