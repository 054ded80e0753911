use crate::domain::{
    flatten_context, format_duration, Context, FlatRow, LogEntry, RowKind, StopOutcome, Task,
    TaskId, TaskTimer, UiMode,
};
use crate::notifications::{notify_budget_reached, Notifier};
use crate::persistence::Settings;
use crate::store::{Store, StoreEvent};
use crate::ticker;
use crate::toast::Toasts;
use chrono::{DateTime, Duration, Local, NaiveDate};
use std::collections::HashSet;
use std::sync::mpsc::Receiver;
use std::time::Instant;

/// A stopped session waiting for the user to confirm its minutes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviseState {
    pub task_id: TaskId,
    pub minutes: i64,
    pub created_at: DateTime<Local>,
}

/// Main application state
pub struct AppState {
    pub store: Store,
    pub settings: Settings,
    pub notifier: Box<dyn Notifier>,
    store_events: Receiver<StoreEvent>,
    pub load_error: Option<String>,
    pub collapsed: HashSet<RowKind>,
    pub selected_index: usize,
    pub timer: TaskTimer,
    pub ui_mode: UiMode,
    pub revise: Option<ReviseState>,
    pub toasts: Toasts,
    pub last_tick: Instant,
    pub budget_notified: bool,
    pub show_logs: bool,
    /// Day the Daily window was last computed for
    pub file_date: NaiveDate,
}

impl AppState {
    pub fn new(mut store: Store, settings: Settings, notifier: Box<dyn Notifier>) -> Self {
        let store_events = store.subscribe();
        let mut app = Self {
            store,
            settings,
            notifier,
            store_events,
            load_error: None,
            collapsed: HashSet::new(),
            selected_index: 0,
            timer: TaskTimer::new(),
            ui_mode: UiMode::Normal,
            revise: None,
            toasts: Toasts::default(),
            last_tick: Instant::now(),
            budget_notified: false,
            show_logs: true,
            file_date: Local::now().date_naive(),
        };
        app.reload();
        app
    }

    /// Rebuild the context from disk; failures are shown, not fatal
    pub fn reload(&mut self) {
        match self.store.reload() {
            Ok(_) => self.load_error = None,
            Err(err) => {
                tracing::error!(error = %err, "failed to load document");
                if err.is_read_error() {
                    self.toasts.error(format!("Load failed: {}", err));
                } else {
                    self.toasts.error(format!("Invalid document: {}", err));
                }
                self.load_error = Some(err.to_string());
            }
        }
        self.process_store_events();
    }

    /// Drain store notifications and refresh derived view state
    pub fn process_store_events(&mut self) {
        let mut changed = false;
        while let Ok(event) = self.store_events.try_recv() {
            tracing::debug!(?event, "store event");
            changed = true;
        }
        if changed || self.context().is_none() {
            self.refresh_view();
        }
    }

    fn refresh_view(&mut self) {
        let row_count = self.rows().len();
        if self.selected_index >= row_count {
            self.selected_index = row_count.saturating_sub(1);
        }

        // A task that vanished from the document can no longer be tracked
        if let Some(task_id) = self.timer.task() {
            let exists = self.context().map_or(false, |ctx| ctx.contains(task_id));
            if !exists && !self.timer.is_running() {
                self.timer.reset();
            }
        }
    }

    pub fn context(&self) -> Option<&Context> {
        self.store.cached()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.context()?.task(id)
    }

    /// Visible tree rows
    pub fn rows(&self) -> Vec<FlatRow> {
        self.context()
            .map(|ctx| flatten_context(ctx, &self.collapsed))
            .unwrap_or_default()
    }

    pub fn selected_row(&self) -> Option<FlatRow> {
        self.rows().into_iter().nth(self.selected_index)
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.rows().len() {
            self.selected_index += 1;
        }
    }

    /// Collapse or expand the selected bucket or parent task
    pub fn toggle_expand(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let expandable = match row.kind {
            RowKind::Bucket(_) => true,
            RowKind::Task(id) => self.task(id).map_or(false, |t| !t.is_leaf()),
        };
        if expandable && !self.collapsed.remove(&row.kind) {
            self.collapsed.insert(row.kind);
        }
    }

    /// Bind the timer to the task under the cursor
    pub fn select_task(&mut self) {
        let Some(RowKind::Task(id)) = self.selected_row().map(|r| r.kind) else {
            self.toasts.warning("Pick a task, not a category");
            return;
        };
        let Some((title, is_leaf)) = self.task(id).map(|t| (t.title.clone(), t.is_leaf())) else {
            return;
        };
        if !is_leaf {
            self.toasts
                .warning("Pick a subtask; time logged on a parent task is not counted");
            return;
        }

        match self.timer.select(id) {
            Ok(()) => self.toasts.success(format!("Selected: {}", title)),
            Err(err) => self.toasts.warning(err.to_string()),
        }
    }

    pub fn start_timer(&mut self) {
        match self.timer.start() {
            Ok(()) => {
                self.last_tick = Instant::now();
                self.budget_notified = false;
                if let Some(task_id) = self.timer.task() {
                    tracing::info!(task_id, "timer started");
                }
            }
            Err(err) => self.toasts.warning(err.to_string()),
        }
    }

    /// Stop the timer and log the session (or open the revise prompt)
    pub fn stop_timer(&mut self) {
        match self.timer.stop(Local::now()) {
            StopOutcome::NotRunning => {}
            StopOutcome::Discarded { task, elapsed } => {
                tracing::info!(
                    task_id = task,
                    seconds = elapsed.num_seconds(),
                    "session discarded"
                );
                self.toasts
                    .warning("Less than a minute elapsed; nothing was logged");
            }
            StopOutcome::Commit(entry) => {
                if self.settings.confirm_before_commit {
                    self.revise = Some(ReviseState {
                        task_id: entry.task_id,
                        minutes: entry.duration.num_minutes(),
                        created_at: entry.created_at,
                    });
                    self.ui_mode = UiMode::Revising;
                } else {
                    self.commit(entry);
                }
            }
        }
    }

    pub fn toggle_timer(&mut self) {
        if self.timer.is_running() {
            self.stop_timer();
        } else {
            self.start_timer();
        }
    }

    fn commit(&mut self, entry: LogEntry) {
        let title = self
            .task(entry.task_id)
            .map(|t| t.title.clone())
            .unwrap_or_default();
        let duration = entry.duration;

        match self.store.push_log(entry) {
            Ok(()) => {
                self.toasts
                    .success(format!("Logged {} on {}", format_duration(duration), title));
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to save log");
                self.toasts.error(format!("Could not save log: {}", err));
            }
        }
        self.process_store_events();
    }

    /// Adjust the pending minutes (never below one)
    pub fn revise_adjust(&mut self, delta: i64) {
        if let Some(revise) = &mut self.revise {
            revise.minutes = (revise.minutes + delta).max(1);
        }
    }

    pub fn revise_confirm(&mut self) {
        if let Some(revise) = self.revise.take() {
            self.ui_mode = UiMode::Normal;
            self.commit(LogEntry::new(
                revise.task_id,
                Duration::minutes(revise.minutes),
                revise.created_at,
            ));
        }
    }

    pub fn revise_discard(&mut self) {
        if self.revise.take().is_some() {
            self.ui_mode = UiMode::Normal;
            self.toasts.warning("Session discarded");
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    /// Advance the running timer and expire toasts (called on tick)
    pub fn tick(&mut self) {
        let delta = ticker::take_elapsed(&mut self.last_tick);
        self.timer.tick(delta);
        self.toasts.expire(Instant::now());
    }

    /// Spent time of the timer's task including the live session
    pub fn live_spent(&self, task: &Task) -> Duration {
        if self.timer.is_running() && self.timer.task() == Some(task.id) {
            task.spent() + self.timer.elapsed()
        } else {
            task.spent()
        }
    }

    /// Raise the attention event once per session when the budget is reached
    pub fn check_budget_reached(&mut self) {
        if !self.settings.notify_on_budget || self.budget_notified || !self.timer.is_running() {
            return;
        }
        let Some(task) = self.timer.task().and_then(|id| self.task(id)) else {
            return;
        };
        let required = task.total_required();
        if required <= Duration::zero() || self.live_spent(task) < required {
            return;
        }

        let title = task.title.clone();
        notify_budget_reached(self.notifier.as_ref(), &title);
        self.toasts.warning(format!("⏰ {} reached its required time", title));
        self.budget_notified = true;
    }

    /// Reload after midnight so the Daily and Weekly windows roll over
    pub fn check_day_rollover(&mut self) {
        self.check_day_rollover_at(Local::now().date_naive());
    }

    pub fn check_day_rollover_at(&mut self, today: NaiveDate) {
        if today != self.file_date {
            tracing::info!(%today, "day changed; reloading");
            self.file_date = today;
            self.reload();
        }
    }

    /// On quit: log a running session without the revise prompt
    pub fn stop_on_exit(&mut self) {
        if let StopOutcome::Commit(entry) = self.timer.stop(Local::now()) {
            self.commit(entry);
        }
        if let Some(revise) = self.revise.take() {
            self.commit(LogEntry::new(
                revise.task_id,
                Duration::minutes(revise.minutes),
                revise.created_at,
            ));
        }
    }
}
