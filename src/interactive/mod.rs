pub mod app;
pub mod event;
pub mod handlers;
pub mod keys;
pub mod layout;
pub mod pipeline;
pub mod popups;
pub mod ui;

pub use app::InteractiveApp;
pub use handlers::run_interactive_mode;
pub use pipeline::{DetailState, IssueRow, RenderPipeline, RowRegistry, RowUpdate, StatusState};
