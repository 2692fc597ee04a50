use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::app::InteractiveApp;
use super::event::{Event, EventHandler};
use super::keys::map_key;
use crate::error::{ErrorContext, JiraError, JiraResult};
use crate::logging::{log_debug, log_error, log_info};

const TICK_RATE_MS: u64 = 100;

pub async fn run_interactive_mode(mut app: InteractiveApp) -> JiraResult<()> {
    log_info("Starting interactive mode");

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    log_debug("Terminal initialized");

    let result = event_loop(&mut terminal, &mut app).await;

    log_info("Exiting interactive mode");

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut InteractiveApp,
) -> JiraResult<()> {
    app.refresh_issues();
    let events = EventHandler::new(TICK_RATE_MS);

    loop {
        if let Err(e) = terminal.draw(|f| super::ui::draw(f, app)) {
            log_error(&format!("Error drawing UI: {}", e));
            return Err(JiraError::TerminalError(e.to_string()));
        }

        // the event thread is blocking; keep request tasks running meanwhile
        let event = tokio::task::block_in_place(|| events.recv())
            .map_err(|e| JiraError::TerminalError(e.to_string()))?;

        match event {
            Event::Key(key_event) => {
                let action = map_key(key_event, &app.popup);
                app.handle_action(action);
            }
            Event::Tick => app.on_tick(),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
