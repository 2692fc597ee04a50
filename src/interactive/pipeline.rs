//! Issue table state and the async requests that fill it in.
//!
//! Every request runs as its own tokio task and reports back through a
//! channel as a [`RowUpdate`]. Applying an update only ever touches the row
//! named by its key, so tasks need no coordination with each other.

use std::collections::HashMap;
use std::future::Future;

use chrono::{Local, NaiveDate};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::client::JiraClient;
use crate::config::ConnectionConfig;
use crate::error::JiraError;
use crate::formatting::duration::{format_duration, sum_worklogs};
use crate::logging::{log_debug, log_error, log_info};
use crate::models::{Issue, IssueType, Transition};
use crate::organize::{organize_with, OrphanPolicy};
use crate::timelog::{parse_date_input, started_now, to_local_date_input_value, validate_time_input};

const ABORTED: &str = "Error: request task aborted";

/// Worklog total and remaining estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Loaded,
    LoggingTime,
}

/// Available status transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusState {
    Loading,
    Loaded,
}

#[derive(Debug, Clone)]
pub struct IssueRow {
    pub key: String,
    pub summary: String,
    pub issue_type: IssueType,
    pub parent_key: Option<String>,
    pub status: Option<String>,
    pub browse_url: String,
    pub detail: DetailState,
    pub total_spent: String,
    pub remaining: String,
    pub statuses: StatusState,
    pub transitions: Vec<Transition>,
    pub time_input: String,
    pub date_input: String,
}

impl IssueRow {
    fn new(issue: &Issue, connection: &ConnectionConfig, today: &str) -> Self {
        Self {
            key: issue.key.clone(),
            summary: issue.fields.summary.clone(),
            issue_type: issue.issue_type(),
            parent_key: issue.parent_key().map(str::to_string),
            status: issue.status_name().map(str::to_string),
            browse_url: connection.browse_url(&issue.key),
            detail: DetailState::Loading,
            total_spent: String::new(),
            remaining: String::new(),
            statuses: StatusState::Loading,
            transitions: Vec::new(),
            time_input: String::new(),
            date_input: today.to_string(),
        }
    }

    pub fn is_story(&self) -> bool {
        self.issue_type == IssueType::Story
    }

    pub fn is_sub_task(&self) -> bool {
        self.issue_type == IssueType::SubTask
    }

    pub fn is_loading(&self) -> bool {
        self.detail != DetailState::Loaded || self.statuses != StatusState::Loaded
    }

    fn show_detail(&mut self, issue: &Issue) {
        self.total_spent = format_duration(sum_worklogs(issue.worklogs()));
        self.remaining = issue.remaining_estimate().unwrap_or_default().to_string();
        if let Some(status) = issue.status_name() {
            self.status = Some(status.to_string());
        }
        self.detail = DetailState::Loaded;
        self.time_input.clear();
    }
}

/// Rows keyed by issue key, plus the order they are displayed in.
#[derive(Debug, Default)]
pub struct RowRegistry {
    order: Vec<String>,
    rows: HashMap<String, IssueRow>,
}

impl RowRegistry {
    pub fn insert(&mut self, row: IssueRow) {
        if !self.rows.contains_key(&row.key) {
            self.order.push(row.key.clone());
        }
        self.rows.insert(row.key.clone(), row);
    }

    pub fn get(&self, key: &str) -> Option<&IssueRow> {
        self.rows.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut IssueRow> {
        self.rows.get_mut(key)
    }

    pub fn at(&self, index: usize) -> Option<&IssueRow> {
        self.order.get(index).and_then(|key| self.rows.get(key))
    }

    pub fn keys(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &IssueRow> {
        self.order.iter().filter_map(|key| self.rows.get(key))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.rows.clear();
    }
}

#[derive(Debug)]
pub enum RowUpdate {
    Listed(Result<Vec<Issue>, String>),
    DetailLoaded { key: String, issue: Issue },
    DetailFailed { key: String, message: String },
    TransitionsLoaded { key: String, transitions: Vec<Transition> },
    TransitionsFailed { key: String, message: String },
    /// Worklog accepted; carries the re-fetched issue or why that failed.
    WorklogLogged { key: String, detail: Result<Issue, String> },
    WorklogFailed { key: String, message: String },
    TransitionFailed { key: String, message: String },
}

pub struct RenderPipeline {
    client: JiraClient,
    connection: ConnectionConfig,
    rows: RowRegistry,
    error: Option<String>,
    listing: bool,
    orphans: OrphanPolicy,
    tx: UnboundedSender<RowUpdate>,
    rx: UnboundedReceiver<RowUpdate>,
}

impl RenderPipeline {
    pub fn new(client: JiraClient, connection: ConnectionConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            connection,
            rows: RowRegistry::default(),
            error: None,
            listing: false,
            orphans: OrphanPolicy::Drop,
            tx,
            rx,
        }
    }

    pub fn rows(&self) -> &RowRegistry {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut RowRegistry {
        &mut self.rows
    }

    pub fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Last write wins: a new error replaces whatever was shown.
    pub fn set_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log_error(&message);
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn is_listing(&self) -> bool {
        self.listing
    }

    /// Starts the issue list request; the result arrives as `RowUpdate::Listed`.
    pub fn load_issues(&mut self, orphans: OrphanPolicy) {
        self.orphans = orphans;
        self.listing = true;
        let client = self.client.clone();
        let jql = self.connection.jql.clone();
        let tx = self.tx.clone();
        self.spawn_guarded(
            async move {
                let result = client
                    .list_issues(&jql)
                    .await
                    .map(|response| response.issues)
                    .map_err(|e| e.user_message());
                let _ = tx.send(RowUpdate::Listed(result));
            },
            RowUpdate::Listed(Err(ABORTED.to_string())),
        );
    }

    /// Initial render: one placeholder row per organized issue.
    pub fn render(&mut self, issues: &[Issue]) {
        let today = to_local_date_input_value(&Local::now());
        self.rows.clear();
        for issue in organize_with(issues, self.orphans) {
            self.rows
                .insert(IssueRow::new(&issue, &self.connection, &today));
        }
        log_info(&format!("Rendered {} issue rows", self.rows.len()));
    }

    pub fn enrich_all(&mut self) {
        let keys: Vec<String> = self.rows.keys().to_vec();
        for key in keys {
            self.enrich(&key);
        }
    }

    /// Fires the detail and transitions requests for one row independently.
    pub fn enrich(&mut self, key: &str) {
        let Some(row) = self.rows.get_mut(key) else {
            return;
        };
        row.detail = DetailState::Loading;
        row.statuses = StatusState::Loading;

        self.spawn_detail(key.to_string());
        self.spawn_transitions(key.to_string());
    }

    /// Submits the row's time input. Invalid input never reaches the tracker.
    pub fn log_time(&mut self, key: &str) -> Result<(), JiraError> {
        self.clear_error();

        let Some(row) = self.rows.get(key) else {
            return Err(JiraError::InvalidInput(format!("Unknown issue {}", key)));
        };
        let parsed = validate_time_input(&row.time_input)
            .map(str::to_string)
            .and_then(|time| parse_date_input(&row.date_input).map(|date| (time, date)));

        let (time_spent, date) = match parsed {
            Ok(values) => values,
            Err(e) => {
                self.set_error(e.user_message());
                return Err(e);
            }
        };

        if let Some(row) = self.rows.get_mut(key) {
            row.detail = DetailState::LoggingTime;
        }
        self.spawn_worklog(key.to_string(), time_spent, date);
        Ok(())
    }

    /// Commits the transition at `index` in the row's transition list.
    pub fn change_status(&mut self, key: &str, index: usize) -> Result<(), JiraError> {
        self.clear_error();

        let Some(row) = self.rows.get(key) else {
            return Err(JiraError::InvalidInput(format!("Unknown issue {}", key)));
        };
        let Some(transition) = row.transitions.get(index).cloned() else {
            let e = JiraError::InvalidInput(format!("No such status option for {}", key));
            self.set_error(e.user_message());
            return Err(e);
        };

        if let Some(row) = self.rows.get_mut(key) {
            row.statuses = StatusState::Loading;
        }
        log_info(&format!("Moving {} to '{}'", key, transition.name));

        let client = self.client.clone();
        let tx = self.tx.clone();
        let on_abort = RowUpdate::TransitionFailed {
            key: key.to_string(),
            message: ABORTED.to_string(),
        };
        let key = key.to_string();
        self.spawn_guarded(
            async move {
                match client.do_transition(&key, &transition.id).await {
                    Ok(()) => {
                        send_detail(&client, &tx, key.clone()).await;
                        send_transitions(&client, &tx, key).await;
                    }
                    Err(e) => {
                        let _ = tx.send(RowUpdate::TransitionFailed {
                            key,
                            message: e.user_message(),
                        });
                    }
                }
            },
            on_abort,
        );
        Ok(())
    }

    pub fn apply(&mut self, update: RowUpdate) {
        match update {
            RowUpdate::Listed(Ok(issues)) => {
                self.listing = false;
                self.render(&issues);
                self.enrich_all();
            }
            RowUpdate::Listed(Err(message)) => {
                self.listing = false;
                self.set_error(message);
            }
            RowUpdate::DetailLoaded { key, issue } => {
                // a fetch started before a submission must not end it
                if let Some(row) = self.rows.get_mut(&key) {
                    if row.detail != DetailState::LoggingTime {
                        row.show_detail(&issue);
                    }
                }
            }
            RowUpdate::DetailFailed { key, message } => {
                if let Some(row) = self.rows.get_mut(&key) {
                    if row.detail != DetailState::LoggingTime {
                        row.detail = DetailState::Loaded;
                    }
                }
                self.set_error(message);
            }
            RowUpdate::TransitionsLoaded { key, transitions } => {
                if let Some(row) = self.rows.get_mut(&key) {
                    row.transitions = transitions;
                    row.statuses = StatusState::Loaded;
                }
            }
            RowUpdate::TransitionsFailed { key, message } => {
                if let Some(row) = self.rows.get_mut(&key) {
                    row.statuses = StatusState::Loaded;
                }
                self.set_error(message);
            }
            RowUpdate::WorklogLogged { key, detail } => {
                let Some(row) = self.rows.get_mut(&key) else {
                    return;
                };
                match detail {
                    Ok(issue) => row.show_detail(&issue),
                    Err(message) => {
                        row.detail = DetailState::Loaded;
                        row.time_input.clear();
                        self.set_error(message);
                    }
                }
            }
            RowUpdate::WorklogFailed { key, message } => {
                // totals from before the attempt stay on screen
                if let Some(row) = self.rows.get_mut(&key) {
                    row.detail = DetailState::Loaded;
                }
                self.set_error(message);
            }
            RowUpdate::TransitionFailed { key, message } => {
                if let Some(row) = self.rows.get_mut(&key) {
                    row.statuses = StatusState::Loaded;
                }
                self.set_error(message);
            }
        }
    }

    /// Applies every update already queued, without waiting.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(update) = self.rx.try_recv() {
            self.apply(update);
            applied += 1;
        }
        applied
    }

    /// Waits until the list request and every row request have finished.
    pub async fn settle(&mut self) {
        while self.listing || self.rows.iter().any(IssueRow::is_loading) {
            match self.rx.recv().await {
                Some(update) => self.apply(update),
                None => break,
            }
        }
    }

    /// Runs a request task; if it dies without reporting, `on_abort` is sent
    /// in its place so the row it was filling stops loading.
    pub(crate) fn spawn_guarded<F>(&self, task: F, on_abort: RowUpdate)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(task);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if let Err(e) = handle.await {
                log_error(&format!("Request task aborted: {}", e));
                let _ = tx.send(on_abort);
            }
        });
    }

    fn spawn_detail(&self, key: String) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let on_abort = RowUpdate::DetailFailed {
            key: key.clone(),
            message: ABORTED.to_string(),
        };
        self.spawn_guarded(
            async move {
                send_detail(&client, &tx, key).await;
            },
            on_abort,
        );
    }

    fn spawn_transitions(&self, key: String) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let on_abort = RowUpdate::TransitionsFailed {
            key: key.clone(),
            message: ABORTED.to_string(),
        };
        self.spawn_guarded(
            async move {
                send_transitions(&client, &tx, key).await;
            },
            on_abort,
        );
    }

    fn spawn_worklog(&self, key: String, time_spent: String, date: NaiveDate) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let on_abort = RowUpdate::WorklogFailed {
            key: key.clone(),
            message: ABORTED.to_string(),
        };
        self.spawn_guarded(
            async move {
                let started = started_now(date);
                log_info(&format!("Logging {} on {} started {}", time_spent, key, started));
                let update = match client.create_worklog(&key, &time_spent, &started).await {
                    Ok(()) => {
                        let detail = client.get_issue(&key).await.map_err(|e| e.user_message());
                        RowUpdate::WorklogLogged { key, detail }
                    }
                    Err(e) => RowUpdate::WorklogFailed {
                        key,
                        message: e.user_message(),
                    },
                };
                let _ = tx.send(update);
            },
            on_abort,
        );
    }
}

async fn send_detail(client: &JiraClient, tx: &UnboundedSender<RowUpdate>, key: String) {
    let update = match client.get_issue(&key).await {
        Ok(issue) => RowUpdate::DetailLoaded { key, issue },
        Err(e) => RowUpdate::DetailFailed {
            key,
            message: e.user_message(),
        },
    };
    let _ = tx.send(update);
}

async fn send_transitions(client: &JiraClient, tx: &UnboundedSender<RowUpdate>, key: String) {
    let update = match client.list_transitions(&key).await {
        Ok(response) => {
            log_debug(&format!("{} has {} transitions", key, response.transitions.len()));
            RowUpdate::TransitionsLoaded {
                key,
                transitions: response.transitions,
            }
        }
        Err(e) => RowUpdate::TransitionsFailed {
            key,
            message: e.user_message(),
        },
    };
    let _ = tx.send(update);
}
