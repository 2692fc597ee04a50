use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Top-level layout regions
pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub error: Rect,
    pub footer: Rect,
}

pub fn app_layout(area: Rect, has_error: bool) -> AppLayout {
    let error_height = if has_error { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(error_height),
            Constraint::Length(1),
        ])
        .split(area);

    AppLayout {
        header: chunks[0],
        main: chunks[1],
        error: chunks[2],
        footer: chunks[3],
    }
}

/// Center a popup of given width/height in the area
pub fn centered_popup(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
