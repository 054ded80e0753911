use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub tree_area: Rect,
    pub timer_area: Rect,
    pub logs_area: Option<Rect>,
    pub status_area: Rect,
}

/// Height of the timer pane
const TIMER_HEIGHT: u16 = 9;

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Main area: Tree (60%) | Timer above recent logs (40%)
/// - Bottom bar: toast/status line (1 row)
pub fn create_layout(area: Rect, show_logs: bool) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status line
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    let (timer_area, logs_area) = if show_logs {
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(TIMER_HEIGHT), Constraint::Min(0)])
            .split(columns[1]);
        (right[0], Some(right[1]))
    } else {
        (columns[1], None)
    };

    MainLayout {
        keybindings_area: main_chunks[0],
        tree_area: columns[0],
        timer_area,
        logs_area,
        status_area: main_chunks[2],
    }
}

/// Create centered modal area
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(10),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = create_layout(area, true);

        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.timer_area.height, TIMER_HEIGHT);
        assert!(layout.tree_area.width > layout.timer_area.width);
        assert!(layout.logs_area.is_some());

        let without_logs = create_layout(area, false);
        assert!(without_logs.logs_area.is_none());
        assert_eq!(without_logs.timer_area.height, 48);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area);

        assert!(modal.width < area.width);
        assert_eq!(modal.height, 10);
    }
}
