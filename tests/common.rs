//! Common test utilities for building form graphs.
use bunki::prelude::*;

/// Short-text blocks in the given order.
#[allow(dead_code)]
pub fn text_blocks(ids: &[&str]) -> Vec<Block> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| Block::new(*id, BlockSubtype::ShortText, i as i64))
        .collect()
}

/// Creates the linear form `a -> b -> c` joined by auto-generated connections.
#[allow(dead_code)]
pub fn create_linear_form() -> (Vec<Block>, Vec<Connection>) {
    let blocks = text_blocks(&["a", "b", "c"]);
    let connections = vec![
        Connection::sequential("a", "b", 0),
        Connection::sequential("b", "c", 1),
    ];
    (blocks, connections)
}

/// A checkbox question with two colour options, followed by two follow-ups.
///
/// Logic: picking "Red" leads to `red_followup`, anything else to `other_followup`.
#[allow(dead_code)]
pub fn create_checkbox_form() -> (Vec<Block>, Vec<Connection>) {
    let blocks = vec![
        Block::new("colors", BlockSubtype::CheckboxGroup, 0).with_options(vec![
            BlockOption::new("o1", "Red"),
            BlockOption::new("o2", "Blue"),
        ]),
        Block::new("red_followup", BlockSubtype::ShortText, 1),
        Block::new("other_followup", BlockSubtype::ShortText, 2),
    ];
    let connections = vec![
        Connection::explicit("c1", "colors", Some("other_followup"))
            .with_rule(Rule::new("r_red", "red_followup").when(ConditionGroup::all(vec![
                ConditionRule::new(
                    ConditionField::from("colors"),
                    ConditionOperator::Equals,
                    "Red",
                ),
            ]))),
    ];
    (blocks, connections)
}

/// A plain `answer` condition.
#[allow(dead_code)]
pub fn answer_is(
    operator: ConditionOperator,
    value: impl Into<ConditionValue>,
) -> ConditionRule {
    ConditionRule::new(ConditionField::Answer, operator, value)
}

/// A rule whose group holds exactly one condition.
#[allow(dead_code)]
pub fn rule_when(id: &str, target: &str, condition: ConditionRule) -> Rule {
    Rule::new(id, target).when(ConditionGroup::all(vec![condition]))
}

/// Position of a block in the slice, panicking when missing.
#[allow(dead_code)]
pub fn idx(blocks: &[Block], id: &str) -> usize {
    blocks
        .iter()
        .position(|b| b.id == id)
        .unwrap_or_else(|| panic!("block '{}' missing from fixture", id))
}

#[allow(dead_code)]
pub const SAMPLE_FORM_JSON: &str = r#"
{
    "blocks": [
        {"id": "role", "subtype": "dropdown", "orderIndex": 0,
         "settings": {"options": [
             {"id": "dev", "label": "Developer", "value": "developer"},
             {"id": "pm", "label": "Product Manager", "value": "pm"}
         ]}},
        {"id": "languages", "subtype": "checkbox_group", "orderIndex": 1,
         "settings": {"options": [
             {"id": "rs", "label": "Rust"},
             {"id": "ts", "label": "TypeScript"}
         ]}},
        {"id": "roadmap", "subtype": "long_text", "orderIndex": 2},
        {"id": "rust_years", "subtype": "number", "orderIndex": 3},
        {"id": "done", "subtype": "statement", "orderIndex": 4}
    ],
    "connections": [
        {"id": "c_role", "sourceId": "role", "defaultTargetId": "roadmap", "is_explicit": true,
         "rules": [{"id": "r_dev", "target_block_id": "languages",
                    "condition_group": {"logical_operator": "AND", "conditions": [
                        {"field": "role", "operator": "equals", "value": "Developer"}
                    ]}}]},
        {"id": "c_lang", "sourceId": "languages", "defaultTargetId": "done",
         "rules": [{"id": "r_rust", "target_block_id": "rust_years",
                    "condition_group": {"logical_operator": "OR", "conditions": [
                        {"field": "languages", "operator": "equals", "value": "Rust"}
                    ]}}]},
        {"id": "c_roadmap", "sourceId": "roadmap", "defaultTargetId": "done", "is_explicit": false},
        {"id": "c_years", "sourceId": "rust_years", "defaultTargetId": "done"}
    ]
}
"#;
