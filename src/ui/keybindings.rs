use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let hints = match mode {
        UiMode::Normal => Line::from(vec![
            Span::raw(" ↑/↓ move   "),
            Span::raw("Enter select   "),
            Span::raw("s start/stop   "),
            Span::raw("Space fold   "),
            Span::raw("r reload   "),
            Span::raw("l logs   "),
            Span::raw("q quit"),
        ]),
        UiMode::Revising => Line::from(vec![
            Span::raw(" +/↑ more   "),
            Span::raw("-/↓ less   "),
            Span::raw("Enter log   "),
            Span::raw("Esc discard"),
        ]),
    };

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
