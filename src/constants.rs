pub const CONFIG_FILE: &str = ".jira-log-time.json";

pub const DEFAULT_BASE_URL: &str = "https://jira.wrs.com";
pub const DEFAULT_API_EXTENSION: &str = "/rest/api/2";
pub const DEFAULT_JQL: &str = "sprint in openSprints() AND assignee=currentUser()  AND issuetype in (Story, Sub-Task) ORDER BY status DESC, updated DESC";

pub const USERNAME_ENV: &str = "JIRA_USERNAME";
pub const PASSWORD_ENV: &str = "JIRA_PASSWORD";

// Jira work calendar: 5-day weeks of 8-hour days
pub const WEEK_SECONDS: u64 = 144_000;
pub const DAY_SECONDS: u64 = 28_800;
pub const HOUR_SECONDS: u64 = 3_600;
pub const MINUTE_SECONDS: u64 = 60;

pub const TIME_INPUT_HELP: &str = "Time input in wrong format. You can specify a time unit after a time value \"X\", such as Xw, Xd, Xh or Xm, to represent weeks (w), days (d), hours (h) and minutes (m), respectively.";
