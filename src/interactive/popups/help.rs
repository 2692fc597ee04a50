use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::interactive::layout::centered_popup;

const BINDINGS: [(&str, &str); 7] = [
    ("j / ↓", "Next issue"),
    ("k / ↑", "Previous issue"),
    ("l / Enter", "Log time on the selected issue"),
    ("s", "Change status"),
    ("r", "Reload issues"),
    ("?", "Toggle this help"),
    ("q / Esc", "Quit"),
];

pub fn draw(frame: &mut Frame, area: Rect) {
    let popup_area = centered_popup(50, BINDINGS.len() as u16 + 2, area);
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(keys, description)| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<12}", keys),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(*description),
            ])
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Keys ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(help, popup_area);
}
