pub mod help;
pub mod log_time;
pub mod status_picker;

use ratatui::{layout::Rect, Frame};

use crate::interactive::app::{InteractiveApp, Popup};

/// Draw the active popup, if any. Draws on top of everything.
pub fn draw_popup(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    let Some(popup) = &app.popup else { return };

    match popup {
        Popup::LogTime { .. } => log_time::draw(frame, area, app),
        Popup::StatusPicker { .. } => status_picker::draw(frame, area, app),
        Popup::Help => help::draw(frame, area),
    }
}
