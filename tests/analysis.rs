//! Tests for cycle detection, orphan analysis and auto-layout.
mod common;
use bunki::prelude::*;
use common::*;

#[test]
fn test_three_node_cycle_marks_every_edge() {
    let blocks = text_blocks(&["a", "b", "c"]);
    let connections = vec![
        Connection::explicit("ab", "a", Some("b")),
        Connection::explicit("bc", "b", Some("c")),
        Connection::explicit("ca", "c", Some("a")),
    ];
    let report = detect_cycles(&blocks, &connections);
    assert!(report.has_cycles);
    assert_eq!(report.connection_ids(), vec!["ab", "bc", "ca"]);
}

#[test]
fn test_chain_without_back_edge_has_no_cycle() {
    let blocks = text_blocks(&["a", "b", "c"]);
    let connections = vec![
        Connection::explicit("ab", "a", Some("b")),
        Connection::explicit("bc", "b", Some("c")),
    ];
    let report = detect_cycles(&blocks, &connections);
    assert!(!report.has_cycles);
    assert!(report.connection_ids().is_empty());
    assert!(!report.contains("ab"));
}

#[test]
fn test_cycle_behind_a_tail_leaves_tail_unmarked() {
    let blocks = text_blocks(&["start", "loop_a", "loop_b", "end"]);
    let connections = vec![
        Connection::explicit("enter", "start", Some("loop_a")),
        Connection::explicit("forward", "loop_a", Some("loop_b")),
        Connection::explicit("back", "loop_b", Some("end"))
            .with_rule(Rule::new("retry", "loop_a")),
    ];
    let report = detect_cycles(&blocks, &connections);
    assert_eq!(report.connection_ids(), vec!["back", "forward"]);
    assert!(!report.contains("enter"));
}

#[test]
fn test_orphans_and_unreachable_blocks() {
    let blocks = text_blocks(&["a", "b", "c", "lonely"]);
    let connections = vec![
        Connection::explicit("c1", "a", Some("c")),
        Connection::explicit("c2", "b", Some("c")),
    ];
    assert_eq!(find_orphans(&blocks, &connections), vec!["lonely".to_string()]);
    // c has no outgoing connection, so `lonely` follows it sequentially; only b is cut off.
    assert_eq!(find_unreachable(&blocks, &connections), vec!["b".to_string()]);
}

#[test]
fn test_layout_respects_configured_spacing() {
    let (blocks, connections) = create_linear_form();
    let config = LayoutConfig {
        column_spacing: 100.0,
        row_spacing: 50.0,
        origin_x: 10.0,
        origin_y: 20.0,
    };
    let layout = compute_layout(&blocks, &connections, &config);
    assert_eq!(layout.len(), 3);
    assert_eq!(layout["a"], Position { x: 10.0, y: 20.0 });
    assert_eq!(layout["c"], Position { x: 210.0, y: 20.0 });
}
