//! Tests for graph synchronization, validation and the orphan guard.
mod common;
use bunki::prelude::*;
use common::*;

#[test]
fn test_added_block_links_to_predecessor() {
    let blocks = text_blocks(&["a", "b"]);
    let event = GraphEvent::BlockAdded {
        block_id: "b".to_string(),
    };
    let connections = synchronize(&event, &blocks, &[]);

    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0].source_id, "a");
    assert_eq!(connections[0].default_target_id.as_deref(), Some("b"));
    assert!(!connections[0].is_explicit);
}

#[test]
fn test_added_block_never_overrides_existing_branch() {
    let blocks = text_blocks(&["a", "b", "c"]);
    let existing = vec![Connection::explicit("c1", "b", None)
        .with_rule(rule_when("r1", "a", answer_is(ConditionOperator::Equals, "loop")))];
    let event = GraphEvent::BlockAdded {
        block_id: "c".to_string(),
    };
    let connections = synchronize(&event, &blocks, &existing);
    assert_eq!(connections, existing);
}

#[test]
fn test_added_block_with_incoming_rule_is_left_alone() {
    let blocks = text_blocks(&["a", "b", "c"]);
    let existing = vec![Connection::explicit("c1", "a", None).with_rule(Rule::new("r1", "c"))];
    let event = GraphEvent::BlockAdded {
        block_id: "c".to_string(),
    };
    // b has no outgoing connection, but c is already a rule target.
    assert_eq!(synchronize(&event, &blocks, &existing), existing);
}

#[test]
fn test_removing_block_prunes_and_strips() {
    let blocks = text_blocks(&["a", "b", "d"]);
    let connections = vec![
        Connection::explicit("into_c", "a", Some("c")),
        Connection::explicit("from_c", "c", Some("d")),
        Connection::explicit("keeps", "b", Some("d"))
            .with_rule(Rule::new("to_c", "c"))
            .with_rule(Rule::new("to_a", "a")),
    ];
    let event = GraphEvent::BlockRemoved {
        block_id: "c".to_string(),
    };
    let result = synchronize(&event, &blocks, &connections);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "keeps");
    let rule_ids: Vec<&str> = result[0].rules.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(rule_ids, vec!["to_a"]);
}

#[test]
fn test_reorder_preserves_explicit_connections() {
    // New order: c, a, b. The explicit a -> c edge no longer follows the sequence.
    let blocks = vec![
        Block::new("c", BlockSubtype::ShortText, 0),
        Block::new("a", BlockSubtype::ShortText, 1),
        Block::new("b", BlockSubtype::ShortText, 2),
    ];
    let explicit = Connection::explicit("user_edge", "a", Some("c"));
    let result = synchronize(&GraphEvent::BlocksReordered, &blocks, &[explicit.clone()]);

    assert_eq!(result[0], explicit);
    // c had nothing outgoing, so it gets linked to a; a already branches, so b gets nothing.
    assert_eq!(result.len(), 2);
    assert_eq!(result[1].id, "auto_c_a");
    assert!(!result[1].is_explicit);
}

#[test]
fn test_reorder_fills_every_gap() {
    let blocks = text_blocks(&["a", "b", "c"]);
    let result = synchronize(&GraphEvent::BlocksReordered, &blocks, &[]);
    let ids: Vec<&str> = result.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["auto_a_b", "auto_b_c"]);
    assert_eq!(result[1].order_index, 1);
}

#[test]
fn test_validation_keeps_placeholder_rules() {
    let blocks = text_blocks(&["a", "b"]);
    let connections = vec![Connection::explicit("c1", "a", Some("b")).with_rule(Rule::new("slot", ""))];
    assert_eq!(validate(&blocks, &connections), connections);
}

#[test]
fn test_orphan_guard_rejects_sole_edge_retarget() {
    let blocks = text_blocks(&["a", "b", "c"]);
    let connections = vec![Connection::explicit("ab", "a", Some("b"))];

    let outcome = retarget("ab", Some("c"), &blocks, &connections).unwrap();
    assert!(!outcome.applied);
    assert_eq!(outcome.connections, connections);
    let conflict = outcome.conflict.unwrap();
    assert_eq!(conflict.orphaned_block_id, "b");
    assert_eq!(conflict.connection_id, "ab");
    assert_eq!(conflict.proposed_target_id.as_deref(), Some("c"));
    assert!(conflict.to_string().contains("would orphan block 'b'"));
}

#[test]
fn test_orphan_guard_allows_retarget_with_second_incoming_edge() {
    let blocks = text_blocks(&["a", "b", "c", "x"]);
    let connections = vec![
        Connection::explicit("ab", "a", Some("b")),
        Connection::explicit("xb", "x", Some("b")),
    ];
    let outcome = retarget("ab", Some("c"), &blocks, &connections).unwrap();
    assert!(outcome.applied);
    assert!(outcome.conflict.is_none());
    assert_eq!(outcome.connections[0].default_target_id.as_deref(), Some("c"));
}

#[test]
fn test_orphan_guard_counts_outgoing_edges() {
    let blocks = text_blocks(&["a", "b", "c"]);
    let connections = vec![
        Connection::explicit("ab", "a", Some("b")),
        Connection::explicit("bc", "b", Some("c")),
    ];
    assert!(retarget("ab", Some("c"), &blocks, &connections).unwrap().applied);
}

#[test]
fn test_retarget_errors_on_unknown_ids() {
    let blocks = text_blocks(&["a", "b"]);
    let connections = vec![Connection::explicit("ab", "a", Some("b"))];
    assert_eq!(
        retarget("nope", Some("b"), &blocks, &connections).unwrap_err(),
        GraphError::ConnectionNotFound("nope".to_string())
    );
    assert_eq!(
        retarget("ab", Some("ghost"), &blocks, &connections).unwrap_err(),
        GraphError::BlockNotFound("ghost".to_string())
    );
}

#[test]
fn test_force_retarget_ignores_guard() {
    let blocks = text_blocks(&["a", "b", "c"]);
    let connections = vec![Connection::sequential("a", "b", 0)];
    let result = force_retarget("auto_a_b", Some("c"), &blocks, &connections).unwrap();
    assert_eq!(result[0].default_target_id.as_deref(), Some("c"));
    assert!(result[0].is_explicit);
}
