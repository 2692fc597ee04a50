pub mod config;
pub mod issues;
pub mod log;
pub mod transitions;
pub mod tui;

pub use config::handle_config;
pub use issues::handle_issues;
pub use log::handle_log;
pub use transitions::{handle_transition, handle_transitions};
pub use tui::handle_tui;
