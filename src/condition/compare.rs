//! Comparisons for conditions that do not need the block graph: plain
//! answer comparisons, `choice:<value>` membership and presence checks.

use crate::model::{Answer, ConditionOperator, ConditionValue};

/// `field == "answer"`: every operator is supported, so this always decides.
pub(super) fn plain_answer(answer: &Answer, op: ConditionOperator, value: &ConditionValue) -> bool {
    match op {
        ConditionOperator::Equals => loosely_equal(answer, value),
        ConditionOperator::NotEquals => !loosely_equal(answer, value),
        ConditionOperator::Contains => match answer {
            Answer::Text(text) => text
                .to_lowercase()
                .contains(&value.to_string().to_lowercase()),
            _ => false,
        },
        ConditionOperator::GreaterThan => numeric(answer, value, |a, b| a > b),
        ConditionOperator::LessThan => numeric(answer, value, |a, b| a < b),
    }
}

/// `field == "choice:<literal>"`. Relational operators make no sense here and stay unclassified.
pub(super) fn choice_membership(
    answer: &Answer,
    choice: &str,
    op: ConditionOperator,
) -> Option<bool> {
    let member = match answer {
        Answer::List(items) => items.iter().any(|item| item == choice),
        Answer::Object(_) => false,
        scalar => scalar.to_string() == choice,
    };
    match op {
        ConditionOperator::Equals | ConditionOperator::Contains => Some(member),
        ConditionOperator::NotEquals => Some(!member),
        ConditionOperator::GreaterThan | ConditionOperator::LessThan => None,
    }
}

/// `field == "selected"`: compares answer presence against the truthiness of `value`.
pub(super) fn presence(
    answer: &Answer,
    op: ConditionOperator,
    value: &ConditionValue,
) -> Option<bool> {
    let matched = answer.is_present() == value.as_flag();
    match op {
        ConditionOperator::Equals => Some(matched),
        ConditionOperator::NotEquals => Some(!matched),
        _ => None,
    }
}

/// Equality with coercion toward whichever side is numeric.
fn loosely_equal(answer: &Answer, value: &ConditionValue) -> bool {
    let numeric_side =
        matches!(answer, Answer::Number(_)) || matches!(value, ConditionValue::Number(_));
    if numeric_side {
        if let (Some(a), Some(b)) = (answer.as_number(), value.as_number()) {
            return a == b;
        }
    }
    match (answer, value) {
        (Answer::Bool(a), ConditionValue::Bool(b)) => a == b,
        (Answer::List(items), _) => {
            let expected = value.to_string();
            items.iter().any(|item| *item == expected)
        }
        (Answer::Object(_), _) => false,
        _ => answer.to_string() == value.to_string(),
    }
}

fn numeric<F>(answer: &Answer, value: &ConditionValue, f: F) -> bool
where
    F: Fn(f64, f64) -> bool,
{
    match (answer.as_number(), value.as_number()) {
        (Some(a), Some(b)) => f(a, b),
        _ => false,
    }
}
