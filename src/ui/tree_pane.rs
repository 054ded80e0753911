use crate::app::AppState;
use crate::domain::{
    bucket_totals, budget_label, progress_glyph, progress_ratio, remaining_state, tree_connector,
    Category, RowKind, Task,
};
use crate::ui::styles::{
    border_style, bucket_style, default_style, error_style, remaining_style, running_style,
    selected_style, title_style, tree_style,
};
use chrono::Duration;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Render the category/task tree
pub fn render_tree_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Tasks ", title_style()));

    let Some(ctx) = app.context() else {
        let message = app
            .load_error
            .clone()
            .unwrap_or_else(|| "No data loaded".to_string());
        let paragraph = Paragraph::new(vec![
            Line::raw(""),
            Line::styled(format!("  {}", message), error_style()),
            Line::raw(""),
            Line::raw("  Fix the file and press r to reload."),
        ])
        .block(block)
        .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
        return;
    };

    let running = app.timer.is_running().then(|| app.timer.task()).flatten();

    let items: Vec<ListItem> = app
        .rows()
        .iter()
        .enumerate()
        .filter_map(|(idx, row)| {
            let line = match row.kind {
                RowKind::Bucket(category) => {
                    let totals = bucket_totals(ctx, category);
                    let collapsed = app.collapsed.contains(&row.kind);
                    create_bucket_line(category, totals.remaining(), totals.required, collapsed)
                }
                RowKind::Task(id) => {
                    let task = ctx.task(id)?;
                    let spent = app.live_spent(task);
                    create_task_line(
                        task,
                        spent,
                        row.depth,
                        row.is_last,
                        app.settings.use_emoji,
                        running == Some(id),
                    )
                }
            };
            let style = if idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            Some(ListItem::new(line).style(style))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

/// Format: ▾ Daily  30m / 1h
fn create_bucket_line(
    category: Category,
    remaining: Duration,
    required: Duration,
    collapsed: bool,
) -> Line<'static> {
    let marker = if collapsed { "▸" } else { "▾" };
    Line::from(vec![
        Span::styled(format!("{} {}", marker, category.label()), bucket_style()),
        Span::raw("  "),
        Span::styled(
            budget_label(remaining, required),
            remaining_style(remaining_state(remaining)),
        ),
    ])
}

/// Format: ├─ [🌿] Write report  10m / 30m ● REC
fn create_task_line(
    task: &Task,
    spent: Duration,
    depth: usize,
    is_last: bool,
    use_emoji: bool,
    running: bool,
) -> Line<'static> {
    let mut spans = Vec::new();

    // Nested tasks sit one indent deeper per level below the top
    if depth > 1 {
        spans.push(Span::raw("   ".repeat(depth - 1)));
    }
    spans.push(Span::styled(
        format!("{} ", tree_connector(is_last)),
        tree_style(),
    ));

    let required = task.total_required();
    let remaining = required - spent;
    let glyph = progress_glyph(progress_ratio(spent, required), use_emoji);
    spans.push(Span::raw(format!("[{}] ", glyph)));
    spans.push(Span::raw(task.title.clone()));
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        budget_label(remaining, required),
        remaining_style(remaining_state(remaining)),
    ));

    if running {
        spans.push(Span::styled(" ● REC", running_style()));
    }

    Line::from(spans)
}
