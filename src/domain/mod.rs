pub mod context;
pub mod enums;
pub mod log;
pub mod task;
pub mod timer;
pub mod views;
pub mod window;

pub use context::{build_context, context_to_raw, Context};
pub use enums::{Category, UiMode};
pub use log::{LogBook, LogEntry};
pub use task::{format_duration, Task, TaskId};
pub use timer::{format_clock, whole_minutes, StopOutcome, TaskTimer, TimerState};
pub use views::{
    budget_label, bucket_totals, flatten_context, progress_glyph, progress_ratio, remaining_state,
    tree_connector, FlatRow, RemainingState, RowKind, Totals,
};
pub use window::WindowPolicy;
