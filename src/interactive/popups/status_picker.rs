use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::interactive::app::{InteractiveApp, Popup};
use crate::interactive::layout::centered_popup;

/// Transition names available for the row; Enter commits the highlighted one.
pub fn draw(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    let Some(Popup::StatusPicker { key, index }) = &app.popup else {
        return;
    };
    let Some(row) = app.popup_row() else { return };

    let height = (row.transitions.len() as u16 + 3).min(area.height);
    let popup_area = centered_popup(40, height, area);
    frame.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = row
        .transitions
        .iter()
        .map(|transition| ListItem::new(Line::from(Span::raw(transition.name.clone()))))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Move {} to ", key))
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(*index));
    frame.render_stateful_widget(list, popup_area, &mut state);
}
