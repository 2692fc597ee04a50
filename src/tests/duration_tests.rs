use crate::formatting::duration::{format_duration, sum_worklogs};
use crate::models::WorklogEntry;

#[test]
fn test_zero_and_sub_minute_render_as_zero_hours() {
    assert_eq!(format_duration(0), "0h");
    assert_eq!(format_duration(59), "0h");
}

#[test]
fn test_single_units() {
    assert_eq!(format_duration(60), "1m");
    assert_eq!(format_duration(3600), "1h");
    assert_eq!(format_duration(28800), "1d");
    assert_eq!(format_duration(144000), "1w");
}

#[test]
fn test_mixed_units_use_work_calendar() {
    // 1w + 2d + 3h + 44m
    assert_eq!(format_duration(144000 + 57600 + 10800 + 2640), "1w 2d 3h 44m");
    assert_eq!(format_duration(9000), "2h 30m");
    assert_eq!(format_duration(28800 + 60), "1d 1m");
}

#[test]
fn test_leftover_seconds_are_dropped() {
    assert_eq!(format_duration(3600 + 59), "1h");
}

#[test]
fn test_sum_worklogs() {
    let entries = vec![
        WorklogEntry { time_spent_seconds: 3600 },
        WorklogEntry { time_spent_seconds: 1800 },
    ];
    assert_eq!(sum_worklogs(&entries), 5400);
    assert_eq!(sum_worklogs(&[]), 0);
    assert_eq!(format_duration(sum_worklogs(&entries)), "1h 30m");
}
