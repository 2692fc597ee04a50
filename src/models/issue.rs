use serde::{Deserialize, Serialize};

use super::worklog::{WorklogEntry, WorklogPage};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Issue {
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: String,
    #[serde(rename = "issuetype")]
    pub issue_type: Option<IssueTypeRef>,
    pub parent: Option<KeyRef>,
    pub status: Option<StatusRef>,
    pub worklog: Option<WorklogPage>,
    #[serde(rename = "timetracking")]
    pub time_tracking: Option<TimeTracking>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IssueTypeRef {
    pub name: String,
    #[serde(default)]
    pub subtask: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct KeyRef {
    pub key: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StatusRef {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct TimeTracking {
    #[serde(rename = "remainingEstimate")]
    pub remaining_estimate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueType {
    Story,
    SubTask,
    Other(String),
}

impl IssueType {
    pub fn from_ref(issue_type: &IssueTypeRef) -> Self {
        if issue_type.subtask || issue_type.name.eq_ignore_ascii_case("Sub-Task") {
            IssueType::SubTask
        } else if issue_type.name == "Story" {
            IssueType::Story
        } else {
            IssueType::Other(issue_type.name.clone())
        }
    }
}

impl Issue {
    pub fn issue_type(&self) -> IssueType {
        self.fields
            .issue_type
            .as_ref()
            .map(IssueType::from_ref)
            .unwrap_or_else(|| IssueType::Other(String::new()))
    }

    pub fn parent_key(&self) -> Option<&str> {
        self.fields.parent.as_ref().map(|p| p.key.as_str())
    }

    pub fn status_name(&self) -> Option<&str> {
        self.fields.status.as_ref().map(|s| s.name.as_str())
    }

    pub fn worklogs(&self) -> &[WorklogEntry] {
        self.fields
            .worklog
            .as_ref()
            .map(|page| page.worklogs.as_slice())
            .unwrap_or(&[])
    }

    pub fn remaining_estimate(&self) -> Option<&str> {
        self.fields
            .time_tracking
            .as_ref()
            .and_then(|t| t.remaining_estimate.as_deref())
    }
}
