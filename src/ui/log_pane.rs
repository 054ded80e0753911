use crate::app::AppState;
use crate::domain::{format_duration, LogEntry};
use crate::ui::styles::{border_style, default_style, hint_style, title_style};
use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render recent logs, newest first
pub fn render_log_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let now = Local::now();

    let items: Vec<ListItem> = app
        .context()
        .map(|ctx| {
            ctx.logs
                .iter()
                .take(visible)
                .map(|entry| {
                    let title = ctx.task(entry.task_id).map_or("?", |t| t.title.as_str());
                    ListItem::new(create_log_line(entry, title, now)).style(default_style())
                })
                .collect()
        })
        .unwrap_or_default();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Recent ", title_style())),
    );

    f.render_widget(list, area);
}

/// Format: 14:05  25m  Write report (date shown for older days)
fn create_log_line(entry: &LogEntry, title: &str, now: DateTime<Local>) -> Line<'static> {
    let stamp = if entry.created_at.date_naive() == now.date_naive() {
        entry.created_at.format("%H:%M").to_string()
    } else {
        entry.created_at.format("%b %d").to_string()
    };

    Line::from(vec![
        Span::styled(format!("{:>6}  ", stamp), hint_style()),
        Span::raw(format!("{:>6}  ", format_duration(entry.duration))),
        Span::raw(title.to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_create_log_line() {
        let now = Local.with_ymd_and_hms(2024, 3, 14, 16, 0, 0).unwrap();
        let today = LogEntry::new(1, Duration::minutes(25), now - Duration::hours(2));
        let line = create_log_line(&today, "Write report", now);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, " 14:00     25m  Write report");

        let older = LogEntry::new(1, Duration::minutes(90), now - Duration::days(3));
        let line = create_log_line(&older, "Write report", now);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("Mar 11"));
        assert!(text.contains("1h 30m"));
    }
}
