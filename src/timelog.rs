//! Helpers for the log-time action: input validation and the `started`
//! timestamp sent with a new worklog.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike};
use regex::Regex;

use crate::error::{JiraError, JiraResult};

lazy_static::lazy_static! {
    static ref TIME_INPUT: Regex =
        Regex::new(r"^\s*[0-9]{1,4}[wdhm](\s+[0-9]{1,4}[wdhm])*\s*$").unwrap();
}

/// Accepts `2h`, `10d`, `9999w`, or several such components (`1d 4h`).
pub fn validate_time_input(input: &str) -> JiraResult<&str> {
    if TIME_INPUT.is_match(input) {
        Ok(input.trim())
    } else {
        Err(JiraError::InvalidTimeInput(input.to_string()))
    }
}

/// Local calendar date as `YYYY-MM-DD`, the value a date picker starts on.
pub fn to_local_date_input_value<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    date.date_naive().format("%Y-%m-%d").to_string()
}

pub fn parse_date_input(input: &str) -> JiraResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        JiraError::InvalidInput(format!("Date must be YYYY-MM-DD, got '{}'", input))
    })
}

/// Builds `YYYY-MM-DDTHH:mm:ss.SSS±HHMM` from the selected date and a
/// wall-clock time of day.
///
/// The offset is the one in effect at the start of `date`, not at the time
/// of day, so around a DST switch the two can disagree.
pub fn started_timestamp<Tz: TimeZone>(tz: &Tz, date: NaiveDate, time_of_day: NaiveTime) -> String {
    let offset = offset_for_date(tz, date);
    let millis = time_of_day.nanosecond() / 1_000_000 % 1_000;
    let naive = NaiveDateTime::new(date, time_of_day);

    format!(
        "{}.{:03}{}",
        naive.format("%Y-%m-%dT%H:%M:%S"),
        millis,
        offset.format_hhmm()
    )
}

pub fn started_now(date: NaiveDate) -> String {
    started_timestamp(&Local, date, Local::now().time())
}

fn offset_for_date<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> chrono::FixedOffset {
    // midnight can fall in a DST gap; noon never does
    [0, 12]
        .iter()
        .filter_map(|&hour| date.and_hms_opt(hour, 0, 0))
        .find_map(|at| tz.offset_from_local_datetime(&at).earliest())
        .map(|offset| offset.fix())
        .unwrap_or_else(|| chrono::Utc.fix())
}

trait HhMm {
    fn format_hhmm(&self) -> String;
}

impl HhMm for chrono::FixedOffset {
    fn format_hhmm(&self) -> String {
        let seconds = self.local_minus_utc();
        let sign = if seconds >= 0 { '+' } else { '-' };
        let minutes = seconds.abs() / 60;
        format!("{}{:02}{:02}", sign, minutes / 60, minutes % 60)
    }
}
