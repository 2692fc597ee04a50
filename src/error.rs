use serde_json::Value;
use thiserror::Error;

use crate::constants::TIME_INPUT_HELP;
use crate::models::ErrorBody;

#[derive(Error, Debug)]
pub enum JiraError {
    #[error("Missing username")]
    MissingUsername,

    #[error("Missing password")]
    MissingPassword,

    #[error("Missing base URL")]
    MissingBaseUrl,

    #[error("Missing API extension")]
    MissingApiExtension,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Error: {status} - {status_text}")]
    Api {
        status: u16,
        status_text: String,
        body: Option<Value>,
    },

    /// A tracker failure already rendered by [`JiraError::user_message`].
    #[error("{0}")]
    Tracker(String),

    #[error("{}", TIME_INPUT_HELP)]
    InvalidTimeInput(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Terminal error: {0}")]
    TerminalError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type JiraResult<T> = Result<T, JiraError>;

impl JiraError {
    /// Single-line message for the error area.
    ///
    /// Tracker-supplied messages win over the status line. Jira reports
    /// request-level problems in `errorMessages` and field-level ones in
    /// `errors`, so both are tried before falling back.
    pub fn user_message(&self) -> String {
        match self {
            JiraError::Api {
                status,
                status_text,
                body,
            } => body
                .as_ref()
                .and_then(tracker_messages)
                .unwrap_or_else(|| format!("Error: {} - {}", status, status_text)),
            JiraError::RequestError(e) => format!("Error: {}", e),
            other => other.to_string(),
        }
    }

    /// Whether `user_message` is already the complete line shown to the user.
    fn is_tracker_failure(&self) -> bool {
        matches!(
            self,
            JiraError::Api { .. } | JiraError::RequestError(_) | JiraError::Tracker(_)
        )
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            JiraError::MissingUsername
                | JiraError::MissingPassword
                | JiraError::MissingBaseUrl
                | JiraError::MissingApiExtension
                | JiraError::ConfigError(_)
        )
    }
}

/// The single line `jlt` prints when a command fails.
pub fn report(error: &(dyn std::error::Error + 'static)) -> String {
    match error.downcast_ref::<JiraError>() {
        Some(e) if e.is_tracker_failure() => e.user_message(),
        _ => format!("Error: {}", error),
    }
}

fn tracker_messages(body: &Value) -> Option<String> {
    let body: ErrorBody = serde_json::from_value(body.clone()).ok()?;
    if !body.error_messages.is_empty() {
        return Some(body.error_messages.join(" "));
    }

    let mut fields: Vec<(String, String)> = body.errors.into_iter().collect();
    if fields.is_empty() {
        return None;
    }
    fields.sort();
    Some(
        fields
            .into_iter()
            .map(|(_, message)| message)
            .collect::<Vec<_>>()
            .join(" "),
    )
}

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> JiraResult<T>;
    fn with_context<F>(self, f: F) -> JiraResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> JiraResult<T> {
        self.map_err(|e| JiraError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> JiraResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| JiraError::Unknown(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> JiraResult<T> {
        self.ok_or_else(|| JiraError::Unknown(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> JiraResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| JiraError::Unknown(f()))
    }
}

#[macro_export]
macro_rules! jira_error {
    ($error_type:ident, $msg:expr) => {
        $crate::error::JiraError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::JiraError::$error_type(format!($fmt, $($arg)*))
    };
}
