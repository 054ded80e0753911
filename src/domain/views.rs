use super::context::Context;
use super::enums::Category;
use super::task::{format_duration, Task, TaskId};
use chrono::Duration;
use std::collections::HashSet;

/// What a row of the tree view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    Bucket(Category),
    Task(TaskId),
}

/// A flattened row for rendering the task tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    /// Depth in the tree (0 = bucket header, 1 = top-level task, 2+ = subtasks)
    pub depth: usize,
    /// Whether this is the last child of its parent
    pub is_last: bool,
    pub kind: RowKind,
}

/// Flatten the bucket/task tree into a linear list, skipping collapsed subtrees
pub fn flatten_context(context: &Context, collapsed: &HashSet<RowKind>) -> Vec<FlatRow> {
    let mut rows = Vec::new();

    for &category in Category::all() {
        let kind = RowKind::Bucket(category);
        rows.push(FlatRow {
            depth: 0,
            is_last: false,
            kind,
        });
        if !collapsed.contains(&kind) {
            flatten_tasks(context.bucket(category), 1, collapsed, &mut rows);
        }
    }

    rows
}

fn flatten_tasks(
    tasks: &[Task],
    depth: usize,
    collapsed: &HashSet<RowKind>,
    rows: &mut Vec<FlatRow>,
) {
    let count = tasks.len();
    for (i, task) in tasks.iter().enumerate() {
        let kind = RowKind::Task(task.id);
        rows.push(FlatRow {
            depth,
            is_last: i + 1 == count,
            kind,
        });
        if !collapsed.contains(&kind) {
            flatten_tasks(&task.children, depth + 1, collapsed, rows);
        }
    }
}

/// Required vs spent for a group of tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub required: Duration,
    pub spent: Duration,
}

impl Totals {
    pub fn of(tasks: &[Task]) -> Self {
        tasks.iter().fold(
            Self {
                required: Duration::zero(),
                spent: Duration::zero(),
            },
            |acc, task| Self {
                required: acc.required + task.total_required(),
                spent: acc.spent + task.spent(),
            },
        )
    }

    pub fn remaining(&self) -> Duration {
        self.required - self.spent
    }
}

/// Totals of one bucket's top-level tasks
pub fn bucket_totals(context: &Context, category: Category) -> Totals {
    Totals::of(context.bucket(category))
}

/// Sign of the remaining time, rendered distinctly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemainingState {
    Left,
    Met,
    Over,
}

pub fn remaining_state(remaining: Duration) -> RemainingState {
    if remaining > Duration::zero() {
        RemainingState::Left
    } else if remaining < Duration::zero() {
        RemainingState::Over
    } else {
        RemainingState::Met
    }
}

/// "remaining / required", e.g. "10m / 30m"
pub fn budget_label(remaining: Duration, required: Duration) -> String {
    format!("{} / {}", format_duration(remaining), format_duration(required))
}

/// Ratio of spent to required (0.0 to 1.0+); a zero budget counts as met
pub fn progress_ratio(spent: Duration, required: Duration) -> f64 {
    if required <= Duration::zero() {
        return 1.0;
    }
    spent.num_seconds() as f64 / required.num_seconds() as f64
}

/// Choose progress glyph based on spent/required ratio
pub fn progress_glyph(ratio: f64, use_emoji: bool) -> &'static str {
    if use_emoji {
        if ratio < 0.25 {
            "🌱" // Sprout
        } else if ratio < 1.0 {
            "🌿" // Leaf
        } else {
            "🌵" // Budget met or overrun
        }
    } else if ratio < 0.25 {
        "*"
    } else if ratio < 1.0 {
        "+"
    } else {
        "!"
    }
}

/// Get tree connector for subtasks
pub fn tree_connector(is_last: bool) -> &'static str {
    if is_last {
        "└─"
    } else {
        "├─"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{build_context, WindowPolicy};
    use crate::persistence::{RawDocument, RawLog, RawTask};
    use chrono::Local;

    fn sample_context() -> Context {
        let now = Local::now();
        let task = |id, category, minutes, parent_id| RawTask {
            id,
            category,
            title: format!("Task {}", id),
            time_required: minutes,
            created_at: now,
            parent_id,
        };
        let raw = RawDocument {
            tasks: vec![
                task(1, Category::Other, 60, None),
                task(2, Category::Other, 0, Some(1)),
                task(3, Category::Other, 30, Some(1)),
                task(4, Category::Other, 45, None),
                task(5, Category::Weekly, 20, None),
            ],
            logs: vec![
                RawLog {
                    task_id: 2,
                    duration: 10,
                    created_at: now,
                },
                RawLog {
                    task_id: 4,
                    duration: 50,
                    created_at: now,
                },
            ],
        };
        build_context(&raw, &WindowPolicy::default(), now).unwrap()
    }

    #[test]
    fn test_flatten_context_expanded() {
        let ctx = sample_context();
        let rows = flatten_context(&ctx, &HashSet::new());

        let kinds: Vec<RowKind> = rows.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RowKind::Bucket(Category::Daily),
                RowKind::Bucket(Category::Weekly),
                RowKind::Task(5),
                RowKind::Bucket(Category::Other),
                RowKind::Task(1),
                RowKind::Task(2),
                RowKind::Task(3),
                RowKind::Task(4),
            ]
        );
        assert_eq!(rows[5].depth, 2);
        assert!(!rows[5].is_last);
        assert!(rows[6].is_last);
        assert!(rows[7].is_last);
    }

    #[test]
    fn test_flatten_context_collapsed() {
        let ctx = sample_context();
        let collapsed = HashSet::from([RowKind::Task(1), RowKind::Bucket(Category::Weekly)]);
        let rows = flatten_context(&ctx, &collapsed);

        assert_eq!(rows.len(), 5); // 3 buckets + tasks 1 and 4
        assert!(!rows.iter().any(|r| r.kind == RowKind::Task(2)));
        assert!(!rows.iter().any(|r| r.kind == RowKind::Task(5)));
    }

    #[test]
    fn test_bucket_totals() {
        let ctx = sample_context();
        let totals = bucket_totals(&ctx, Category::Other);
        // Task 1 counts its children (0 + 30), not its own 60
        assert_eq!(totals.required, Duration::minutes(75));
        assert_eq!(totals.spent, Duration::minutes(60));
        assert_eq!(totals.remaining(), Duration::minutes(15));

        let daily = bucket_totals(&ctx, Category::Daily);
        assert_eq!(daily.required, Duration::zero());
    }

    #[test]
    fn test_remaining_state() {
        assert_eq!(remaining_state(Duration::minutes(5)), RemainingState::Left);
        assert_eq!(remaining_state(Duration::zero()), RemainingState::Met);
        assert_eq!(remaining_state(Duration::minutes(-5)), RemainingState::Over);
    }

    #[test]
    fn test_budget_label() {
        assert_eq!(budget_label(Duration::minutes(10), Duration::minutes(30)), "10m / 30m");
        assert_eq!(budget_label(Duration::minutes(-5), Duration::minutes(45)), "-5m / 45m");
    }

    #[test]
    fn test_progress_glyph() {
        assert_eq!(progress_glyph(0.1, true), "🌱");
        assert_eq!(progress_glyph(0.5, true), "🌿");
        assert_eq!(progress_glyph(1.2, true), "🌵");
        assert_eq!(progress_glyph(0.1, false), "*");
        assert_eq!(progress_glyph(1.0, false), "!");
    }

    #[test]
    fn test_progress_ratio() {
        assert_eq!(progress_ratio(Duration::minutes(30), Duration::minutes(60)), 0.5);
        assert_eq!(progress_ratio(Duration::minutes(5), Duration::zero()), 1.0);
    }

    #[test]
    fn test_tree_connector() {
        assert_eq!(tree_connector(false), "├─");
        assert_eq!(tree_connector(true), "└─");
    }
}
