use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_FILE, DEFAULT_API_EXTENSION, DEFAULT_BASE_URL, DEFAULT_JQL, PASSWORD_ENV, USERNAME_ENV,
};
use crate::error::{JiraError, JiraResult};

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_extension() -> String {
    DEFAULT_API_EXTENSION.to_string()
}

fn default_jql() -> String {
    DEFAULT_JQL.to_string()
}

/// The six named settings fields, stored as one JSON document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_extension")]
    pub api_extension: String,
    #[serde(default = "default_jql")]
    pub jql: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            username: String::new(),
            password: String::new(),
            description: String::new(),
            base_url: default_base_url(),
            api_extension: default_api_extension(),
            jql: default_jql(),
        }
    }
}

/// Credentials sent with every tracker request.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionConfig {
    pub base_url: String,
    pub api_extension: String,
    pub jql: String,
}

impl ConnectionConfig {
    pub fn api_root(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_extension.trim_matches('/')
        )
    }

    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.base_url.trim_end_matches('/'), key)
    }
}

impl Settings {
    /// Checks the mandatory fields and splits them into what the client needs.
    ///
    /// Order matters: the first missing field is the one reported.
    pub fn validate(&self) -> JiraResult<(Credentials, ConnectionConfig)> {
        if self.username.trim().is_empty() {
            return Err(JiraError::MissingUsername);
        }
        if self.password.trim().is_empty() {
            return Err(JiraError::MissingPassword);
        }
        if self.base_url.trim().is_empty() {
            return Err(JiraError::MissingBaseUrl);
        }
        if self.api_extension.trim().is_empty() {
            return Err(JiraError::MissingApiExtension);
        }

        let credentials = Credentials {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        };
        let connection = ConnectionConfig {
            base_url: self.base_url.trim().to_string(),
            api_extension: self.api_extension.trim().to_string(),
            jql: self.jql.clone(),
        };
        Ok((credentials, connection))
    }

    /// Applies `JIRA_USERNAME` / `JIRA_PASSWORD` on top of stored values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(username) = env::var(USERNAME_ENV) {
            self.username = username;
        }
        if let Ok(password) = env::var(PASSWORD_ENV) {
            self.password = password;
        }
        self
    }

    pub fn masked_password(&self) -> String {
        if self.password.is_empty() {
            String::new()
        } else {
            "*".repeat(8)
        }
    }
}

pub fn config_path() -> JiraResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| JiraError::ConfigError("Could not find home directory".to_string()))?;
    Ok(home_dir.join(CONFIG_FILE))
}

pub fn load_settings_from(path: &Path) -> JiraResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| {
        JiraError::ConfigError(format!("Invalid settings file {}: {}", path.display(), e))
    })
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> JiraResult<()> {
    let raw = serde_json::to_string_pretty(settings)?;
    fs::write(path, raw)?;
    Ok(())
}

pub fn load_settings() -> JiraResult<Settings> {
    Ok(load_settings_from(&config_path()?)?.with_env_overrides())
}

pub fn save_settings(settings: &Settings) -> JiraResult<()> {
    save_settings_to(&config_path()?, settings)
}
