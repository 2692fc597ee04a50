use std::path::Path;

use crate::client::JiraClient;
use crate::config::{load_settings, load_settings_from, ConnectionConfig, Settings};
use crate::error::JiraResult;

/// Central context for CLI operations: the loaded settings and, once they
/// validate, a client bound to them.
pub struct CliContext {
    settings: Settings,
    session: Option<(JiraClient, ConnectionConfig)>,
}

impl CliContext {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            session: None,
        }
    }

    /// Load context from saved configuration
    pub fn load() -> JiraResult<Self> {
        Ok(Self::new(load_settings()?))
    }

    /// Load context from an explicit settings file, without env overrides
    pub fn load_from(path: &Path) -> JiraResult<Self> {
        Ok(Self::new(load_settings_from(path)?))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Validates the settings and builds the client on first use.
    ///
    /// A missing mandatory field fails here, before any request is made.
    pub fn verified_client(&mut self) -> JiraResult<(JiraClient, ConnectionConfig)> {
        if let Some(session) = &self.session {
            return Ok(session.clone());
        }

        let (credentials, connection) = self.settings.validate()?;
        let client = JiraClient::new(&connection, credentials)?;
        self.session = Some((client.clone(), connection.clone()));
        Ok((client, connection))
    }
}

/// Builder for contexts with explicit settings, bypassing the settings file.
pub struct CliContextBuilder {
    settings: Settings,
}

impl CliContextBuilder {
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
        }
    }

    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.settings.username = username.to_string();
        self.settings.password = password.to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.settings.base_url = base_url.to_string();
        self
    }

    pub fn with_api_extension(mut self, api_extension: &str) -> Self {
        self.settings.api_extension = api_extension.to_string();
        self
    }

    pub fn with_jql(mut self, jql: &str) -> Self {
        self.settings.jql = jql.to_string();
        self
    }

    pub fn build(self) -> CliContext {
        CliContext::new(self.settings)
    }
}

impl Default for CliContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
