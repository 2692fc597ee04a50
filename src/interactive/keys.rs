use crossterm::event::{KeyCode, KeyEvent};

use crate::interactive::app::Popup;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,

    // Issue actions
    LogTime,
    ChangeStatus,
    Refresh,

    // Popup: log time form
    NextField,
    TypeChar(char),
    Backspace,

    // Popup: status picker
    PickerUp,
    PickerDown,

    // General
    Confirm,
    Cancel,
    Help,
    Quit,

    None,
}

pub fn map_key(key: KeyEvent, popup: &Option<Popup>) -> Action {
    match popup {
        Some(popup) => map_popup_key(key, popup),
        None => map_list_key(key),
    }
}

fn map_list_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('l') | KeyCode::Enter => Action::LogTime,
        KeyCode::Char('s') => Action::ChangeStatus,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('?') => Action::Help,
        _ => Action::None,
    }
}

fn map_popup_key(key: KeyEvent, popup: &Popup) -> Action {
    match popup {
        Popup::LogTime { .. } => match key.code {
            KeyCode::Enter => Action::Confirm,
            KeyCode::Esc => Action::Cancel,
            KeyCode::Tab | KeyCode::BackTab => Action::NextField,
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Char(c) => Action::TypeChar(c),
            _ => Action::None,
        },
        Popup::StatusPicker { .. } => match key.code {
            KeyCode::Char('j') | KeyCode::Down => Action::PickerDown,
            KeyCode::Char('k') | KeyCode::Up => Action::PickerUp,
            KeyCode::Enter => Action::Confirm,
            KeyCode::Esc | KeyCode::Char('q') => Action::Cancel,
            _ => Action::None,
        },
        Popup::Help => match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Action::Cancel,
            _ => Action::None,
        },
    }
}
