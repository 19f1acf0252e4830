//! Error types for planning operations.

use crate::id::TaskId;

/// Result alias for planning operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Malformed input rejected before any analysis runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// No tasks were supplied
    #[error("task list is empty")]
    EmptyTaskList,

    /// A task has no id
    #[error("task at position {position} has no id")]
    MissingId {
        /// Zero-based position in the input list
        position: usize,
    },

    /// A task has blank content
    #[error("task {id} has empty content")]
    EmptyContent {
        /// The offending task
        id: TaskId,
    },

    /// Two tasks share an id
    #[error("duplicate task id: {id}")]
    DuplicateId {
        /// The repeated id
        id: TaskId,
    },
}

/// Errors that can occur while planning.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input validation failed
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration values are out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A dependency heuristic could not be built
    #[error("invalid heuristic pattern: {0}")]
    Pattern(String),
}
