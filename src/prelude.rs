//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the
//! bunki crate. Import it to get the graph model, the service and the
//! navigation session without importing each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use bunki::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let snapshot = GraphSnapshot::from_file("path/to/form.json")?;
//! let config = EngineConfig::from_file("path/to/engine.json")?;
//! let service = WorkflowGraphService::with_config(snapshot, config);
//!
//! let report = service.detect_cycles();
//! println!("Cycles: {:?}", report.connection_ids());
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::model::{
    Answer, Block, BlockOption, BlockSettings, BlockSubtype, ConditionField, ConditionGroup,
    ConditionOperator, ConditionRule, ConditionValue, Connection, GraphSnapshot, IntoGraph,
    LogicalOperator, Position, Rule,
};

// Engine components
pub use crate::analysis::{
    CycleReport, compute_layout, detect_cycles, find_orphans, find_unreachable,
};
pub use crate::condition::{ConditionEvaluator, evaluate_condition, evaluate_group};
pub use crate::resolver::{NextBlockResolver, Resolution, resolve_next};
pub use crate::service::WorkflowGraphService;
pub use crate::session::{Advance, Direction, NavigationSession};
pub use crate::sync::{
    GraphEvent, OrphanConflict, RetargetOutcome, force_retarget, retarget, synchronize, validate,
};

// Configuration
pub use crate::config::{ConditionPolicy, EngineConfig, LayoutConfig};

// Error types
pub use crate::error::{GraphConversionError, GraphError, NavigationError, SnapshotError};

// Trace formatting
pub use crate::trace::{PathFormatter, PathStep, StepReason};

// Result type alias for convenience
pub type Result<T, E = Box<dyn std::error::Error>> = std::result::Result<T, E>;
