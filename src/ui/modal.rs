use crate::app::AppState;
use crate::domain::format_duration;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use chrono::Duration;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the revise prompt shown before a session is logged
pub fn render_revise_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(revise) = &app.revise else {
        return;
    };
    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let title = app
        .task(revise.task_id)
        .map(|t| t.title.clone())
        .unwrap_or_default();

    let lines = vec![
        Line::raw(""),
        Line::raw(format!("  Log time for: {}", title)),
        Line::raw(""),
        Line::from(vec![
            Span::raw("  Duration: "),
            Span::styled(
                format_duration(Duration::minutes(revise.minutes)),
                modal_title_style(),
            ),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [+/-]", modal_title_style()),
            Span::raw(" Adjust  "),
            Span::styled("[Enter]", modal_title_style()),
            Span::raw(" Log  "),
            Span::styled("[Esc]", modal_title_style()),
            Span::raw(" Discard"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" ⏱ Session Finished ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
