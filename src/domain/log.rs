use super::task::TaskId;
use chrono::{DateTime, Duration, Local};
use std::collections::VecDeque;

/// An immutable record of time spent on a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub task_id: TaskId,
    pub duration: Duration,
    pub created_at: DateTime<Local>,
}

impl LogEntry {
    pub fn new(task_id: TaskId, duration: Duration, created_at: DateTime<Local>) -> Self {
        Self {
            task_id,
            duration,
            created_at,
        }
    }
}

/// Append-only log sequence, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogBook {
    entries: VecDeque<LogEntry>,
}

impl LogBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `entries` in the given order (document order)
    pub fn from_entries(entries: Vec<LogEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    /// Insert a new entry at the front
    pub fn prepend(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }
}
