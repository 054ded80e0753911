use super::enums::Category;
use super::log::{LogBook, LogEntry};
use super::task::{Task, TaskId};
use super::window::WindowPolicy;
use crate::error::FormatError;
use crate::persistence::{RawDocument, RawLog, RawTask};
use chrono::{DateTime, Duration, Local};
use std::collections::{HashMap, HashSet};

/// Location of a task: its top-level bucket plus child indices from the root
#[derive(Debug, Clone, PartialEq, Eq)]
struct TaskPath {
    bucket: Category,
    indices: Vec<usize>,
}

/// Full in-memory snapshot of tasks and logs built from one document
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    pub daily: Vec<Task>,
    pub weekly: Vec<Task>,
    pub other: Vec<Task>,
    pub logs: LogBook,
    index: HashMap<TaskId, TaskPath>,
}

impl Context {
    /// Top-level tasks of a bucket
    pub fn bucket(&self, category: Category) -> &[Task] {
        match category {
            Category::Daily => &self.daily,
            Category::Weekly => &self.weekly,
            Category::Other => &self.other,
        }
    }

    /// Look up any task (top-level or nested) by id
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        let path = self.index.get(&id)?;
        let (first, rest) = path.indices.split_first()?;
        let mut task = self.bucket(path.bucket).get(*first)?;
        for &i in rest {
            task = task.children.get(i)?;
        }
        Some(task)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn task_count(&self) -> usize {
        self.index.len()
    }

    /// Prepend a new log entry. Spent time is not recomputed here; the
    /// context is rebuilt from disk after every mutation.
    pub fn prepend_log(&mut self, entry: LogEntry) -> Result<(), FormatError> {
        if !self.contains(entry.task_id) {
            return Err(FormatError::UnknownTask(entry.task_id));
        }
        if entry.duration < Duration::zero() {
            return Err(FormatError::NegativeDuration(entry.task_id));
        }
        // The rebuilt context must be able to sum every log
        self.logs
            .iter()
            .try_fold(entry.duration, |acc, log| acc.checked_add(&log.duration))
            .ok_or(FormatError::DurationOutOfRange(entry.task_id))?;
        self.logs.prepend(entry);
        Ok(())
    }

    fn buckets(&self) -> impl Iterator<Item = &Task> {
        self.daily.iter().chain(self.weekly.iter()).chain(self.other.iter())
    }
}

/// Build a context from a raw document. Any dangling or malformed
/// reference aborts the whole build.
pub fn build_context(
    raw: &RawDocument,
    policy: &WindowPolicy,
    now: DateTime<Local>,
) -> Result<Context, FormatError> {
    // 1. One task per record, id-indexed, with no children and zero spent time
    let mut pending: HashMap<TaskId, Task> = HashMap::with_capacity(raw.tasks.len());
    let mut parents: HashMap<TaskId, Option<TaskId>> = HashMap::with_capacity(raw.tasks.len());
    let mut order: Vec<TaskId> = Vec::with_capacity(raw.tasks.len());
    // Document-wide sums bound every subtree and bucket total
    let mut budget_total = Duration::zero();

    for (position, record) in raw.tasks.iter().enumerate() {
        if pending.contains_key(&record.id) {
            return Err(FormatError::DuplicateTask(record.id));
        }
        if record.time_required < 0 {
            return Err(FormatError::NegativeBudget(record.id));
        }
        let budget = Duration::try_minutes(record.time_required)
            .ok_or(FormatError::BudgetOutOfRange(record.id))?;
        budget_total = budget_total
            .checked_add(&budget)
            .ok_or(FormatError::BudgetOutOfRange(record.id))?;

        let mut task = Task::new(
            record.id,
            record.category,
            record.title.clone(),
            budget,
            record.created_at,
        );
        task.position = position;
        parents.insert(record.id, record.parent_id);
        order.push(record.id);
        pending.insert(record.id, task);
    }

    // 2. Resolve every log against the index, grouping windowed sums by task
    let mut entries = Vec::with_capacity(raw.logs.len());
    let mut spent: HashMap<TaskId, Duration> = HashMap::new();
    let mut log_total = Duration::zero();
    for record in &raw.logs {
        let Some(task) = pending.get(&record.task_id) else {
            return Err(FormatError::UnknownTask(record.task_id));
        };
        if record.duration < 0 {
            return Err(FormatError::NegativeDuration(record.task_id));
        }
        let duration = Duration::try_minutes(record.duration)
            .ok_or(FormatError::DurationOutOfRange(record.task_id))?;
        log_total = log_total
            .checked_add(&duration)
            .ok_or(FormatError::DurationOutOfRange(record.task_id))?;

        let start = policy.start_for(task.category, now);
        if start.map_or(true, |s| record.created_at >= s) {
            let sum = spent.entry(record.task_id).or_insert_with(Duration::zero);
            *sum = *sum + duration;
        }
        entries.push(LogEntry::new(record.task_id, duration, record.created_at));
    }
    let logs = LogBook::from_entries(entries);

    // 3. Attach each task's windowed sum
    for (id, sum) in spent {
        if let Some(task) = pending.get_mut(&id) {
            task.logged = sum;
        }
    }

    // 4. Rebuild the hierarchy, then bucket the roots
    let children = link_children(&order, &parents)?;

    let mut context = Context {
        daily: Vec::new(),
        weekly: Vec::new(),
        other: Vec::new(),
        logs,
        index: HashMap::new(),
    };

    for id in &order {
        if parents.get(id).copied().flatten().is_some() {
            continue;
        }
        if let Some(task) = assemble(*id, &mut pending, &children) {
            match task.category {
                Category::Daily => context.daily.push(task),
                Category::Weekly => context.weekly.push(task),
                Category::Other => context.other.push(task),
            }
        }
    }

    // 5. Index every task by its path
    let mut index = HashMap::with_capacity(order.len());
    for &bucket in Category::all() {
        let mut prefix = Vec::new();
        index_tasks(context.bucket(bucket), bucket, &mut prefix, &mut index);
    }
    context.index = index;

    Ok(context)
}

/// Validate parent references and group child ids under each parent
fn link_children(
    order: &[TaskId],
    parents: &HashMap<TaskId, Option<TaskId>>,
) -> Result<HashMap<TaskId, Vec<TaskId>>, FormatError> {
    let mut children: HashMap<TaskId, Vec<TaskId>> = HashMap::new();

    for &id in order {
        let Some(parent) = parents.get(&id).copied().flatten() else {
            continue;
        };
        if !parents.contains_key(&parent) {
            return Err(FormatError::UnknownParent { task: id, parent });
        }

        let mut seen = HashSet::from([id]);
        let mut current = Some(parent);
        while let Some(ancestor) = current {
            if !seen.insert(ancestor) {
                return Err(FormatError::ParentCycle(ancestor));
            }
            current = parents.get(&ancestor).copied().flatten();
        }

        children.entry(parent).or_default().push(id);
    }

    Ok(children)
}

fn assemble(
    id: TaskId,
    pending: &mut HashMap<TaskId, Task>,
    children: &HashMap<TaskId, Vec<TaskId>>,
) -> Option<Task> {
    let mut task = pending.remove(&id)?;
    if let Some(child_ids) = children.get(&id) {
        for &child_id in child_ids {
            if let Some(child) = assemble(child_id, pending, children) {
                task.add_child(child);
            }
        }
    }
    Some(task)
}

fn index_tasks(
    tasks: &[Task],
    bucket: Category,
    prefix: &mut Vec<usize>,
    index: &mut HashMap<TaskId, TaskPath>,
) {
    for (i, task) in tasks.iter().enumerate() {
        prefix.push(i);
        index.insert(
            task.id,
            TaskPath {
                bucket,
                indices: prefix.clone(),
            },
        );
        index_tasks(&task.children, bucket, prefix, index);
        prefix.pop();
    }
}

/// Flatten a context back into the persisted form, in document order
pub fn context_to_raw(context: &Context) -> RawDocument {
    let mut tasks: Vec<(usize, RawTask)> = Vec::with_capacity(context.task_count());
    for root in context.buckets() {
        root.walk(&mut |task, parent_id| {
            tasks.push((
                task.position,
                RawTask {
                    id: task.id,
                    category: task.category,
                    title: task.title.clone(),
                    time_required: task.time_required.num_minutes(),
                    created_at: task.created_at,
                    parent_id,
                },
            ));
        });
    }
    tasks.sort_by_key(|(position, _)| *position);

    let logs = context
        .logs
        .iter()
        .map(|log| RawLog {
            task_id: log.task_id,
            duration: log.duration.num_minutes(),
            created_at: log.created_at,
        })
        .collect();

    RawDocument {
        tasks: tasks.into_iter().map(|(_, task)| task).collect(),
        logs,
    }
}
