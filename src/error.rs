//! Error types for loading, building and persisting the task document

use crate::domain::TaskId;
use std::path::PathBuf;
use thiserror::Error;

/// The document's contents are well-formed JSON but violate a reference rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("IllegalFormat: No such task with id={0}")]
    UnknownTask(TaskId),

    #[error("IllegalFormat: Duplicate task id={0}")]
    DuplicateTask(TaskId),

    #[error("IllegalFormat: Task id={task} names unknown parent id={parent}")]
    UnknownParent { task: TaskId, parent: TaskId },

    #[error("IllegalFormat: Task id={0} is part of a parent cycle")]
    ParentCycle(TaskId),

    #[error("IllegalFormat: Task id={0} has a negative required time")]
    NegativeBudget(TaskId),

    #[error("IllegalFormat: Log for task id={0} has a negative duration")]
    NegativeDuration(TaskId),

    #[error("IllegalFormat: Required time of task id={0} is out of range")]
    BudgetOutOfRange(TaskId),

    #[error("IllegalFormat: Log for task id={0} has an out-of-range duration")]
    DurationOutOfRange(TaskId),
}

/// Failure while reading, decoding or writing the document
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl StoreError {
    /// Storage was absent or unreadable (missing file, bad JSON, bad values)
    pub fn is_read_error(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Parse { .. })
    }
}

/// Invalid timer operations; recovered locally with a warning
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    #[error("Select a task before starting the timer")]
    NoTaskSelected,

    #[error("Stop the running timer first")]
    Running,
}
