use super::enums::Category;
use chrono::{DateTime, Duration, Local};

/// Identity of a task within one document
pub type TaskId = u64;

/// A unit of work with a time budget, optionally split into subtasks
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub category: Category,
    pub title: String,
    /// Own budget. Ignored once the task has children.
    pub time_required: Duration,
    pub created_at: DateTime<Local>,
    /// Subtasks, exclusively owned
    pub children: Vec<Task>,
    /// Logged time inside the category window (only read for leaves)
    pub logged: Duration,
    /// Index of the record in the persisted task list
    pub(crate) position: usize,
}

impl Task {
    pub fn new(
        id: TaskId,
        category: Category,
        title: String,
        time_required: Duration,
        created_at: DateTime<Local>,
    ) -> Self {
        Self {
            id,
            category,
            title,
            time_required,
            created_at,
            children: Vec::new(),
            logged: Duration::zero(),
            position: 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn add_child(&mut self, child: Task) {
        self.children.push(child);
    }

    /// Required time: children are authoritative when present
    pub fn total_required(&self) -> Duration {
        if self.is_leaf() {
            return self.time_required;
        }
        self.children
            .iter()
            .map(Task::total_required)
            .fold(Duration::zero(), |acc, d| acc + d)
    }

    /// Spent time inside each leaf's category window
    pub fn spent(&self) -> Duration {
        if self.is_leaf() {
            return self.logged;
        }
        self.children
            .iter()
            .map(Task::spent)
            .fold(Duration::zero(), |acc, d| acc + d)
    }

    /// Required minus spent; negative once the budget is overrun
    pub fn remaining(&self) -> Duration {
        self.total_required() - self.spent()
    }

    /// Visit this task and all descendants, parents before children
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Task, Option<TaskId>)) {
        self.walk_with_parent(None, visit);
    }

    fn walk_with_parent<'a>(
        &'a self,
        parent: Option<TaskId>,
        visit: &mut impl FnMut(&'a Task, Option<TaskId>),
    ) {
        visit(self, parent);
        for child in &self.children {
            child.walk_with_parent(Some(self.id), visit);
        }
    }
}

/// Format a duration as "Xh Ym" (omits 0 values, keeps the sign)
pub fn format_duration(duration: Duration) -> String {
    let total_minutes = duration.num_minutes();
    let sign = if total_minutes < 0 { "-" } else { "" };
    let total_minutes = total_minutes.abs();
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 && minutes > 0 {
        format!("{}{}h {}m", sign, hours, minutes)
    } else if hours > 0 {
        format!("{}{}h", sign, hours)
    } else {
        format!("{}{}m", sign, minutes)
    }
}
