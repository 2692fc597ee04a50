// Module declarations
pub mod cli_context;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod interactive;
pub mod logging;
pub mod models;
pub mod organize;
pub mod timelog;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use client::JiraClient;
pub use config::{load_settings, save_settings, ConnectionConfig, Credentials, Settings};
pub use error::{ErrorContext, JiraError, JiraResult};
pub use models::*;
pub use organize::{organize, organize_with, OrphanPolicy};
