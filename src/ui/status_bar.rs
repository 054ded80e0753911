use crate::app::AppState;
use crate::ui::styles::{hint_style, toast_style};
use ratatui::{layout::Rect, text::Span, widgets::Paragraph, Frame};

/// Render the latest toast, or the data file path when there is none
pub fn render_status_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let span = match app.toasts.latest() {
        Some(toast) => Span::styled(
            toast_text(&toast.message, app.toasts.len()),
            toast_style(toast.kind),
        ),
        None => Span::styled(format!(" {}", app.store.path().display()), hint_style()),
    };

    f.render_widget(Paragraph::new(span), area);
}

/// Newest message, with a count of the older ones still visible
fn toast_text(message: &str, visible: usize) -> String {
    if visible > 1 {
        format!(" {} (+{} more)", message, visible - 1)
    } else {
        format!(" {}", message)
    }
}
