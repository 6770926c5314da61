//! # Bunki - Workflow Graph Engine for Branching Forms
//!
//! **Bunki** decides which question a respondent sees next. A form is a list of
//! blocks joined by connections; each connection can carry ordered rules whose
//! condition groups inspect the answer just given. Bunki evaluates those
//! conditions, resolves the next block, keeps the connection graph well-formed
//! while an editor adds, removes and reorders blocks, and reports structures
//! worth a second look: cycles, orphans and unreachable blocks.
//!
//! ## Core Workflow
//!
//! The engine only ever sees plain in-memory data. Loading and saving the graph
//! belongs to the caller.
//!
//! 1.  **Load Your Data**: Parse your stored form into your own structs, or straight into a `GraphSnapshot` with serde.
//! 2.  **Convert**: Implement `IntoGraph` for your structs if they don't already match the engine's model.
//! 3.  **Edit**: Wrap the snapshot in a `WorkflowGraphService` and apply editor operations. Each one re-synchronizes the connections.
//! 4.  **Respond**: Start a `NavigationSession` and submit answers; the session asks the resolver where to go.
//!
//! ## Quick Start
//!
//! ```rust
//! use bunki::prelude::*;
//!
//! let blocks = vec![
//!     Block::new("plan", BlockSubtype::MultipleChoice, 0).with_options(vec![
//!         BlockOption::new("o1", "Free"),
//!         BlockOption::new("o2", "Pro"),
//!     ]),
//!     Block::new("team_size", BlockSubtype::Number, 1),
//!     Block::new("thanks", BlockSubtype::Statement, 2),
//! ];
//!
//! // Pro users are asked about their team; everyone else goes straight to the end.
//! let connections = vec![
//!     Connection::explicit("c1", "plan", Some("thanks")).with_rule(
//!         Rule::new("r1", "team_size").when(ConditionGroup::all(vec![ConditionRule::new(
//!             ConditionField::from("plan"),
//!             ConditionOperator::Equals,
//!             "Pro",
//!         )])),
//!     ),
//!     Connection::explicit("c2", "team_size", Some("thanks")),
//! ];
//!
//! let service = WorkflowGraphService::new(GraphSnapshot::new(blocks, connections));
//! assert!(!service.detect_cycles().has_cycles);
//!
//! let mut session = service.session().unwrap();
//! session.submit_answer(Answer::from("o2")).unwrap();
//! assert_eq!(session.current_block().id, "team_size");
//!
//! session.submit_answer(Answer::Number(12.0)).unwrap();
//! assert_eq!(session.current_block().id, "thanks");
//! println!("{}", PathFormatter::format_path(session.navigation_path()));
//! ```

pub mod analysis;
pub mod condition;
pub mod config;
pub mod error;
pub mod model;
pub mod prelude;
pub mod resolver;
pub mod service;
pub mod session;
pub mod sync;
pub mod trace;
