use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct WorklogPage {
    #[serde(default)]
    pub worklogs: Vec<WorklogEntry>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WorklogEntry {
    #[serde(rename = "timeSpentSeconds", default)]
    pub time_spent_seconds: u64,
}

/// Body of `POST /issue/{key}/worklog`.
#[derive(Debug, Serialize)]
pub struct NewWorklog<'a> {
    #[serde(rename = "timeSpent")]
    pub time_spent: &'a str,
    pub started: &'a str,
}
