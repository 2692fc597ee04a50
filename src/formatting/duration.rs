use crate::constants::{DAY_SECONDS, HOUR_SECONDS, MINUTE_SECONDS, WEEK_SECONDS};
use crate::models::WorklogEntry;

const UNITS: [(u64, char); 4] = [
    (WEEK_SECONDS, 'w'),
    (DAY_SECONDS, 'd'),
    (HOUR_SECONDS, 'h'),
    (MINUTE_SECONDS, 'm'),
];

/// Renders seconds in Jira's work-calendar notation, e.g. `1w 2d 3h 44m`.
///
/// Anything below one minute, including zero, renders as `0h`.
pub fn format_duration(total_seconds: u64) -> String {
    let mut remaining = total_seconds;
    let parts: Vec<String> = UNITS
        .iter()
        .filter_map(|&(unit_seconds, suffix)| {
            let count = remaining / unit_seconds;
            remaining %= unit_seconds;
            (count > 0).then(|| format!("{}{}", count, suffix))
        })
        .collect();

    if parts.is_empty() {
        "0h".to_string()
    } else {
        parts.join(" ")
    }
}

pub fn sum_worklogs(entries: &[WorklogEntry]) -> u64 {
    entries.iter().map(|entry| entry.time_spent_seconds).sum()
}
