use crate::app::AppState;
use crate::domain::UiMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Minutes added or removed per step in the revise prompt
const REVISE_STEP: i64 = 1;
const REVISE_BIG_STEP: i64 = 5;

/// Handle keyboard input events; returns true when the app should quit
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Revising => handle_revise_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        // Bind the timer to the highlighted task
        KeyCode::Enter => app.select_task(),

        KeyCode::Char('s') | KeyCode::Char('S') => app.toggle_timer(),

        KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => app.toggle_expand(),

        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reload();
            if app.load_error.is_none() {
                app.toasts.success("Reloaded");
            }
        }

        KeyCode::Char('l') | KeyCode::Char('L') => app.toggle_show_logs(),

        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),

        _ => {}
    }
    Ok(false)
}

/// Handle keys while the stopped session awaits confirmation
fn handle_revise_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => app.revise_adjust(REVISE_STEP),
        KeyCode::Char('-') | KeyCode::Down => app.revise_adjust(-REVISE_STEP),
        KeyCode::Right | KeyCode::PageUp => app.revise_adjust(REVISE_BIG_STEP),
        KeyCode::Left | KeyCode::PageDown => app.revise_adjust(-REVISE_BIG_STEP),
        KeyCode::Enter => app.revise_confirm(),
        KeyCode::Esc => app.revise_discard(),
        _ => {}
    }
    Ok(false)
}
