//! Tests for the respondent navigation session.
mod common;
use bunki::prelude::*;
use common::*;

#[test]
fn test_linear_walk_completes() {
    let (blocks, connections) = create_linear_form();
    let mut session = NavigationSession::new(&blocks, &connections).unwrap();

    assert_eq!(session.submit_answer(Answer::from("1")), Ok(Advance::Moved { index: 1 }));
    assert_eq!(session.submit_answer(Answer::from("2")), Ok(Advance::Moved { index: 2 }));
    assert!(session.is_last_question());
    assert_eq!(session.submit_answer(Answer::from("3")), Ok(Advance::Completed));
    assert!(session.is_complete());
    assert_eq!(session.history(), &[0, 1, 2]);
    assert_eq!(
        PathFormatter::format_route(session.navigation_path()),
        "a -> b -> c"
    );
}

#[test]
fn test_advancing_without_answer_is_rejected() {
    let (blocks, connections) = create_linear_form();
    let mut session = NavigationSession::new(&blocks, &connections).unwrap();

    assert_eq!(
        session.go_to_next(),
        Err(NavigationError::MissingAnswer {
            block_id: "a".to_string()
        })
    );
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.history(), &[0]);
}

#[test]
fn test_back_then_new_branch_discards_forward_history() {
    let (blocks, connections) = create_checkbox_form();
    let mut session = NavigationSession::new(&blocks, &connections).unwrap();

    session.submit_answer(Answer::from(vec!["o1"])).unwrap();
    assert_eq!(session.current_block().id, "red_followup");

    assert!(session.go_to_previous());
    assert_eq!(session.direction(), Direction::Backward);
    assert_eq!(session.current_block().id, "colors");
    assert_eq!(session.answer_for("colors"), Some(&Answer::from(vec!["o1"])));

    session.submit_answer(Answer::from(vec!["o2"])).unwrap();
    assert_eq!(session.current_block().id, "other_followup");
    assert_eq!(session.history(), &[0, 2]);
    assert!(!session.go_to_forward());
}

#[test]
fn test_forward_history_can_be_revisited() {
    let (blocks, connections) = create_linear_form();
    let mut session = NavigationSession::new(&blocks, &connections).unwrap();
    session.submit_answer(Answer::from("1")).unwrap();
    session.submit_answer(Answer::from("2")).unwrap();

    assert!(session.go_to_previous());
    assert!(session.go_to_previous());
    assert!(!session.go_to_previous());
    assert_eq!(session.current_index(), 0);

    assert!(session.go_to_forward());
    assert_eq!(session.current_index(), 1);
    assert_eq!(session.direction(), Direction::Forward);
}

#[test]
fn test_going_back_from_completion_reopens_last_block() {
    let (blocks, connections) = create_linear_form();
    let mut session = NavigationSession::new(&blocks, &connections).unwrap();
    for answer in ["1", "2", "3"] {
        session.submit_answer(Answer::from(answer)).unwrap();
    }
    assert_eq!(
        session.submit_answer(Answer::from("again")),
        Err(NavigationError::AlreadyComplete)
    );

    assert!(session.can_go_back());
    assert!(session.go_to_previous());
    assert!(!session.is_complete());
    assert_eq!(session.current_block().id, "c");
}

#[test]
fn test_reset_clears_everything() {
    let (blocks, connections) = create_linear_form();
    let mut session = NavigationSession::new(&blocks, &connections).unwrap();
    session.submit_answer(Answer::from("1")).unwrap();

    session.reset();
    assert_eq!(session.current_index(), 0);
    assert!(session.answers().is_empty());
    assert!(session.navigation_path().is_empty());
    assert_eq!(session.history(), &[0]);
    assert!(!session.can_go_back());
}

#[test]
fn test_empty_form_cannot_start() {
    assert_eq!(
        NavigationSession::new(&[], &[]).unwrap_err(),
        NavigationError::EmptyForm
    );
}

#[test]
fn test_session_starts_at_lowest_order_index() {
    let blocks = vec![
        Block::new("later", BlockSubtype::ShortText, 5),
        Block::new("intro", BlockSubtype::Statement, 1),
    ];
    let session = NavigationSession::new(&blocks, &[]).unwrap();
    assert_eq!(session.current_block().id, "intro");
    assert!(session.is_last_question());
}
