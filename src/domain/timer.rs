use super::log::LogEntry;
use super::task::TaskId;
use crate::error::TimerError;
use chrono::{DateTime, Duration, Local};

/// Phase of the task timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// No task selected
    Idle,
    /// Task chosen, timer not running
    TaskSelected { task: TaskId },
    /// Timer running, elapsed accumulating
    Started { task: TaskId, elapsed: Duration },
    /// Timer halted; elapsed was either committed or discarded
    Stopped { task: TaskId, elapsed: Duration },
}

/// What stopping the timer produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// Timer was not running; nothing happened
    NotRunning,
    /// Under one whole minute elapsed; no log is produced
    Discarded { task: TaskId, elapsed: Duration },
    /// A log entry ready to be pushed
    Commit(LogEntry),
}

/// Timer for one tracking session at a time
#[derive(Debug, Clone)]
pub struct TaskTimer {
    state: TimerState,
}

impl Default for TaskTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Started { .. })
    }

    /// Task the timer is bound to, if any
    pub fn task(&self) -> Option<TaskId> {
        match self.state {
            TimerState::Idle => None,
            TimerState::TaskSelected { task }
            | TimerState::Started { task, .. }
            | TimerState::Stopped { task, .. } => Some(task),
        }
    }

    /// Elapsed time of the current or last session
    pub fn elapsed(&self) -> Duration {
        match self.state {
            TimerState::Started { elapsed, .. } | TimerState::Stopped { elapsed, .. } => elapsed,
            _ => Duration::zero(),
        }
    }

    /// Choose the task to track. Refused while running.
    pub fn select(&mut self, task: TaskId) -> Result<(), TimerError> {
        if self.is_running() {
            return Err(TimerError::Running);
        }
        self.state = TimerState::TaskSelected { task };
        Ok(())
    }

    /// Start a new session on the selected task
    pub fn start(&mut self) -> Result<(), TimerError> {
        match self.state {
            TimerState::Idle => Err(TimerError::NoTaskSelected),
            TimerState::Started { .. } => Err(TimerError::Running),
            TimerState::TaskSelected { task } | TimerState::Stopped { task, .. } => {
                self.state = TimerState::Started {
                    task,
                    elapsed: Duration::zero(),
                };
                Ok(())
            }
        }
    }

    /// Accumulate elapsed time (called on tick)
    pub fn tick(&mut self, delta: Duration) {
        if let TimerState::Started { task, elapsed } = self.state {
            self.state = TimerState::Started {
                task,
                elapsed: elapsed + delta,
            };
        }
    }

    /// Halt the session and judge whether it is worth logging
    pub fn stop(&mut self, now: DateTime<Local>) -> StopOutcome {
        let TimerState::Started { task, elapsed } = self.state else {
            return StopOutcome::NotRunning;
        };
        self.state = TimerState::Stopped { task, elapsed };

        let minutes = whole_minutes(elapsed);
        if minutes == 0 {
            return StopOutcome::Discarded { task, elapsed };
        }
        StopOutcome::Commit(LogEntry::new(task, Duration::minutes(minutes), now))
    }

    /// Drop back to idle (e.g. the selected task vanished on reload)
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
    }
}

/// Whole minutes, rounded down
pub fn whole_minutes(elapsed: Duration) -> i64 {
    elapsed.num_seconds().max(0) / 60
}

/// Format elapsed time as a clock ("05:07" or "1:02:03")
pub fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}
