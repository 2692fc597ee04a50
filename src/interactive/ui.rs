use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use super::app::InteractiveApp;
use super::layout::app_layout;
use super::pipeline::{DetailState, IssueRow, StatusState};
use super::popups;
use crate::formatting::utils::truncate;

const SPINNER: &str = "⟳";

pub fn draw(frame: &mut Frame, app: &InteractiveApp) {
    let layout = app_layout(frame.size(), app.pipeline.error().is_some());

    draw_header(frame, layout.header, app);
    draw_table(frame, layout.main, app);
    draw_error(frame, layout.error, app);
    draw_footer(frame, layout.footer);

    popups::draw_popup(frame, frame.size(), app);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    let title = if app.title.is_empty() {
        "Jira Log Time"
    } else {
        app.title.as_str()
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if app.pipeline.is_listing() {
        spans.push(Span::styled(
            format!("{} loading issues", SPINNER),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        spans.push(Span::styled(
            format!("{} issues", app.pipeline.rows().len()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let query = Line::from(Span::styled(
        format!(" {}", app.pipeline.connection().jql),
        Style::default().fg(Color::DarkGray),
    ));

    let header = Paragraph::new(vec![Line::from(spans), query])
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_table(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    let summary_width = area.width.saturating_sub(14 + 16 + 10 + 12 + 6) as usize;

    let rows: Vec<Row> = app
        .pipeline
        .rows()
        .iter()
        .map(|row| issue_row(row, summary_width))
        .collect();

    let header = Row::new(vec!["Key", "Status", "Summary", "Remaining", "Logged"])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

    let widths = [
        Constraint::Length(14),
        Constraint::Length(16),
        Constraint::Min(10),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::NONE))
        .highlight_style(Style::default().bg(Color::Rgb(40, 44, 60)))
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !app.pipeline.rows().is_empty() {
        state.select(Some(app.selected_index));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn issue_row(row: &IssueRow, summary_width: usize) -> Row<'static> {
    let key_cell = if row.is_sub_task() {
        Cell::from(format!("└ {}", row.key)).style(Style::default().fg(Color::Blue))
    } else if row.is_story() {
        Cell::from(row.key.clone())
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    } else {
        Cell::from(row.key.clone()).style(Style::default().fg(Color::Cyan))
    };

    let status = match row.statuses {
        StatusState::Loading => SPINNER.to_string(),
        StatusState::Loaded => {
            let name = row.status.clone().unwrap_or_default();
            if row.transitions.is_empty() {
                name
            } else {
                format!("{} ▾", name)
            }
        }
    };

    let (remaining, logged) = match row.detail {
        DetailState::Loaded => (row.remaining.clone(), row.total_spent.clone()),
        DetailState::Loading | DetailState::LoggingTime => {
            (SPINNER.to_string(), SPINNER.to_string())
        }
    };

    Row::new(vec![
        key_cell,
        Cell::from(status).style(Style::default().fg(Color::Yellow)),
        Cell::from(truncate(&row.summary, summary_width.max(10))),
        Cell::from(remaining).style(Style::default().fg(Color::Magenta)),
        Cell::from(logged).style(Style::default().fg(Color::Green)),
    ])
}

fn draw_error(frame: &mut Frame, area: Rect, app: &InteractiveApp) {
    let Some(message) = app.pipeline.error() else {
        return;
    };
    if area.height == 0 {
        return;
    }

    let error = Paragraph::new(Span::styled(message.to_string(), Style::default().fg(Color::Red)))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(error, area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let hints = " j/k: Move  l/Enter: Log time  s: Status  r: Reload  ?: Help  q: Quit";
    let footer = Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray)));
    frame.render_widget(footer, area);
}
