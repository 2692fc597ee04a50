pub mod issue;
pub mod search;
pub mod transition;
pub mod worklog;

// Re-export commonly used types
pub use issue::{Issue, IssueFields, IssueType, IssueTypeRef, KeyRef, StatusRef, TimeTracking};
pub use search::{ErrorBody, SearchResponse};
pub use transition::{Transition, TransitionRequest, TransitionsResponse};
pub use worklog::{NewWorklog, WorklogEntry, WorklogPage};
