use thiserror::Error;

/// Errors raised by editor operations that reference something missing or malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Block '{0}' not found in the graph")]
    BlockNotFound(String),

    #[error("Connection '{0}' not found in the graph")]
    ConnectionNotFound(String),

    #[error("Rule '{rule_id}' not found on connection '{connection_id}'")]
    RuleNotFound {
        connection_id: String,
        rule_id: String,
    },

    #[error("A block with id '{0}' already exists")]
    DuplicateBlock(String),

    #[error("A connection with id '{0}' already exists")]
    DuplicateConnection(String),

    #[error("Invalid block reorder: {0}")]
    InvalidReorder(String),
}

/// Caller errors on a respondent-facing navigation session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("The form has no blocks to navigate")]
    EmptyForm,

    #[error("No answer has been recorded for block '{block_id}'")]
    MissingAnswer { block_id: String },

    #[error("The form is already complete")]
    AlreadyComplete,
}

/// Errors that can occur while loading or saving snapshots and configuration files.
#[derive(Error, Debug, Clone)]
pub enum SnapshotError {
    #[error("I/O failure: {0}")]
    Io(String),

    #[error("Failed to parse JSON: {0}")]
    Parse(String),
}

/// Errors that can occur when converting a custom user format into a `GraphSnapshot`.
#[derive(Error, Debug, Clone)]
pub enum GraphConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}
