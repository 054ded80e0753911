use crate::app::AppState;
use crate::domain::{budget_label, format_clock, remaining_state, TimerState};
use crate::ui::styles::{
    border_style, hint_style, idle_style, remaining_style, running_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the timer pane: bound task, clock and budget
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let state = app.timer.state();
    let task = app.timer.task().and_then(|id| app.task(id));

    let (badge, badge_style) = match state {
        TimerState::Idle => ("IDLE", idle_style()),
        TimerState::TaskSelected { .. } => ("READY", idle_style()),
        TimerState::Started { .. } => ("RUNNING", running_style()),
        TimerState::Stopped { .. } => ("STOPPED", idle_style()),
    };

    let mut lines = vec![Line::raw("")];

    match task {
        Some(task) => {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(task.title.clone(), title_style()),
            ]));
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::raw("  ⏱ "),
                Span::styled(format_clock(app.timer.elapsed()), badge_style),
                Span::raw("  "),
                Span::styled(badge, badge_style),
            ]));

            let required = task.total_required();
            let remaining = required - app.live_spent(task);
            lines.push(Line::from(vec![
                Span::raw("  Left: "),
                Span::styled(
                    budget_label(remaining, required),
                    remaining_style(remaining_state(remaining)),
                ),
            ]));
        }
        None => {
            lines.push(Line::styled("  No task selected", idle_style()));
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                "  Move to a task and press Enter",
                hint_style(),
            ));
        }
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Timer ", title_style())),
    );

    f.render_widget(paragraph, area);
}
