pub mod keybindings;
pub mod layout;
pub mod log_pane;
pub mod modal;
pub mod status_bar;
pub mod styles;
pub mod timer_pane;
pub mod tree_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use keybindings::render_keybindings;
use layout::create_layout;
use log_pane::render_log_pane;
use modal::render_revise_modal;
use ratatui::Frame;
use status_bar::render_status_bar;
use timer_pane::render_timer_pane;
use tree_pane::render_tree_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size, app.show_logs);

    render_keybindings(f, app.ui_mode, layout.keybindings_area);

    render_tree_pane(f, app, layout.tree_area);
    render_timer_pane(f, app, layout.timer_area);
    if let Some(logs_area) = layout.logs_area {
        render_log_pane(f, app, logs_area);
    }

    render_status_bar(f, app, layout.status_area);

    if app.ui_mode == UiMode::Revising {
        render_revise_modal(f, app, size);
    }
}
