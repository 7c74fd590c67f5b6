//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub header: Rect,
    pub search: Rect,
    /// Active filter chips
    pub filters: Rect,
    pub table: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Panel docked to the right edge, full height
pub fn drawer_area(area: Rect, min_width: u16, percent: u16) -> Rect {
    let width = (area.width * percent / 100).max(min_width).min(area.width);
    Rect::new(area.x + area.width - width, area.y, width, area.height)
}

/// Calculate main screen layout
pub fn calculate_main_layout(area: Rect, has_status: bool) -> MainLayout {
    let mut constraints = vec![
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
    ];
    if has_status {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let (status, help) = if has_status {
        (Some(chunks[4]), chunks[5])
    } else {
        (None, chunks[4])
    };

    MainLayout {
        header: chunks[0],
        search: chunks[1],
        filters: chunks[2],
        table: chunks[3],
        status,
        help,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_is_clamped() {
        let area = Rect::new(0, 0, 30, 10);
        let popup = centered_popup(area, 50, 7);
        assert_eq!(popup.width, 30);
        assert_eq!(popup.y, 1);
    }

    #[test]
    fn test_drawer_is_docked_right() {
        let area = Rect::new(0, 0, 100, 40);
        let drawer = drawer_area(area, 50, 40);
        assert_eq!(drawer.width, 50);
        assert_eq!(drawer.x + drawer.width, 100);
        assert_eq!(drawer.height, 40);
    }

    #[test]
    fn test_main_layout_status_row() {
        let area = Rect::new(0, 0, 80, 30);
        let with_status = calculate_main_layout(area, true);
        assert!(with_status.status.is_some());
        let without = calculate_main_layout(area, false);
        assert!(without.status.is_none());
        assert!(without.table.height > with_status.table.height);
    }
}
