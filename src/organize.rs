use crate::models::{Issue, IssueType};

/// What to do with a sub-task whose parent Story is not in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanPolicy {
    #[default]
    Drop,
    Keep,
}

/// Reorders issues so every Story is immediately followed by its sub-tasks.
///
/// Sub-tasks keep their relative input order under the parent; any other
/// issue stays where it was. Sub-tasks whose parent Story is absent are
/// dropped.
pub fn organize(issues: &[Issue]) -> Vec<Issue> {
    organize_with(issues, OrphanPolicy::Drop)
}

pub fn organize_with(issues: &[Issue], orphans: OrphanPolicy) -> Vec<Issue> {
    let mut ordered = Vec::with_capacity(issues.len());

    for issue in issues {
        match issue.issue_type() {
            IssueType::SubTask => {
                if orphans == OrphanPolicy::Keep && !has_story_parent(issue, issues) {
                    ordered.push(issue.clone());
                }
            }
            IssueType::Story => {
                ordered.push(issue.clone());
                ordered.extend(
                    issues
                        .iter()
                        .filter(|child| {
                            child.issue_type() == IssueType::SubTask
                                && child.parent_key() == Some(issue.key.as_str())
                        })
                        .cloned(),
                );
            }
            IssueType::Other(_) => ordered.push(issue.clone()),
        }
    }

    ordered
}

fn has_story_parent(sub_task: &Issue, issues: &[Issue]) -> bool {
    let Some(parent) = sub_task.parent_key() else {
        return false;
    };
    issues
        .iter()
        .any(|candidate| candidate.key == parent && candidate.issue_type() == IssueType::Story)
}
