use crate::interactive::keys::Action;
use crate::interactive::pipeline::{DetailState, IssueRow, RenderPipeline, StatusState};
use crate::logging::log_debug;
use crate::organize::OrphanPolicy;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogField {
    Time,
    Date,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Popup {
    LogTime { key: String, field: LogField },
    StatusPicker { key: String, index: usize },
    Help,
}

pub struct InteractiveApp {
    pub pipeline: RenderPipeline,
    pub title: String,
    pub selected_index: usize,
    pub popup: Option<Popup>,
    pub orphans: OrphanPolicy,
    pub should_quit: bool,
}

impl InteractiveApp {
    pub fn new(pipeline: RenderPipeline, title: String, orphans: OrphanPolicy) -> Self {
        Self {
            pipeline,
            title,
            selected_index: 0,
            popup: None,
            orphans,
            should_quit: false,
        }
    }

    pub fn refresh_issues(&mut self) {
        self.pipeline.clear_error();
        self.pipeline.load_issues(self.orphans);
    }

    /// Applies finished requests; called on every tick.
    pub fn on_tick(&mut self) {
        if self.pipeline.drain() > 0 {
            let len = self.pipeline.rows().len();
            if self.selected_index >= len {
                self.selected_index = len.saturating_sub(1);
            }
        }
    }

    pub fn selected_row(&self) -> Option<&IssueRow> {
        self.pipeline.rows().at(self.selected_index)
    }

    pub fn popup_row(&self) -> Option<&IssueRow> {
        match &self.popup {
            Some(Popup::LogTime { key, .. }) | Some(Popup::StatusPicker { key, .. }) => {
                self.pipeline.rows().get(key)
            }
            _ => None,
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        log_debug(&format!("Action {:?} with popup {:?}", action, self.popup));
        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveDown => self.move_selection_down(),
            Action::MoveUp => self.move_selection_up(),
            Action::Refresh => self.refresh_issues(),
            Action::Help => self.popup = Some(Popup::Help),
            Action::LogTime => self.open_log_time(),
            Action::ChangeStatus => self.open_status_picker(),
            Action::NextField => self.toggle_log_field(),
            Action::TypeChar(c) => self.edit_input(|input| input.push(c)),
            Action::Backspace => self.edit_input(|input| {
                input.pop();
            }),
            Action::PickerUp => self.move_picker(false),
            Action::PickerDown => self.move_picker(true),
            Action::Confirm => self.confirm_popup(),
            Action::Cancel => self.popup = None,
            Action::None => {}
        }
    }

    fn move_selection_down(&mut self) {
        let len = self.pipeline.rows().len();
        if len > 0 {
            self.selected_index = (self.selected_index + 1) % len;
        }
    }

    fn move_selection_up(&mut self) {
        let len = self.pipeline.rows().len();
        if len > 0 {
            if self.selected_index == 0 {
                self.selected_index = len - 1;
            } else {
                self.selected_index -= 1;
            }
        }
    }

    fn open_log_time(&mut self) {
        let Some(row) = self.selected_row() else { return };
        // one submission per row at a time
        if row.detail == DetailState::LoggingTime {
            return;
        }
        self.popup = Some(Popup::LogTime {
            key: row.key.clone(),
            field: LogField::Time,
        });
    }

    fn open_status_picker(&mut self) {
        let Some(row) = self.selected_row() else { return };
        if row.statuses != StatusState::Loaded || row.transitions.is_empty() {
            return;
        }
        self.popup = Some(Popup::StatusPicker {
            key: row.key.clone(),
            index: 0,
        });
    }

    fn toggle_log_field(&mut self) {
        if let Some(Popup::LogTime { field, .. }) = &mut self.popup {
            *field = match field {
                LogField::Time => LogField::Date,
                LogField::Date => LogField::Time,
            };
        }
    }

    fn edit_input<F: FnOnce(&mut String)>(&mut self, edit: F) {
        let Some(Popup::LogTime { key, field }) = &self.popup else {
            return;
        };
        let field = *field;
        if let Some(row) = self.pipeline.rows_mut().get_mut(key) {
            match field {
                LogField::Time => edit(&mut row.time_input),
                LogField::Date => edit(&mut row.date_input),
            }
        }
    }

    fn move_picker(&mut self, down: bool) {
        let count = self.popup_row().map(|row| row.transitions.len()).unwrap_or(0);
        if let Some(Popup::StatusPicker { index, .. }) = &mut self.popup {
            if count == 0 {
                return;
            }
            *index = if down {
                (*index + 1) % count
            } else {
                (*index + count - 1) % count
            };
        }
    }

    fn confirm_popup(&mut self) {
        match self.popup.take() {
            Some(Popup::LogTime { key, field }) => {
                // invalid input keeps the popup open with the error shown
                if self.pipeline.log_time(&key).is_err() {
                    self.popup = Some(Popup::LogTime { key, field });
                }
            }
            Some(Popup::StatusPicker { key, index }) => {
                let _ = self.pipeline.change_status(&key, index);
            }
            Some(Popup::Help) | None => {}
        }
    }
}
