use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::interactive::app::{InteractiveApp, LogField, Popup};
use crate::interactive::layout::centered_popup;

/// Time and date fields for a new worklog on the row the popup was opened for.
pub fn draw(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    let Some(Popup::LogTime { key, field }) = &app.popup else {
        return;
    };
    let Some(row) = app.popup_row() else { return };

    let popup_area = centered_popup(56, 7, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Log time on {} ", key))
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines = vec![
        input_line("Time", &row.time_input, *field == LogField::Time),
        input_line("Date", &row.date_input, *field == LogField::Date),
        Line::from(""),
        Line::from(Span::styled(
            "e.g. 2h, 30m, 1d 4h   Tab: Switch  Enter: Log  Esc: Cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn input_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut spans = vec![
        Span::styled(format!("{:<6}", label), label_style),
        Span::styled(value, Style::default().fg(Color::White)),
    ];
    if focused {
        spans.push(Span::styled(
            " ",
            Style::default().bg(Color::White).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}
