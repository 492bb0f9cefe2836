//! Day-of-week parsing for meeting days.
//!
//! Accepts English day names ("Monday", "Mon") as well as the registrar's
//! compact day codes ("M", "Tu", "W", "Th", "F", "Sa", "Su"), which may be
//! run together into a pattern such as "MWF" or "TuTh".

use chrono::Weekday;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

use super::error::ScheduleError;

static DAY_PATTERN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Th|Tu|Sa|Su|M|W|F)+$").unwrap());
static DAY_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Th|Tu|Sa|Su|M|W|F").unwrap());

/// Full English name of a weekday, used for reporting.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn day_from_code(code: &str) -> Option<Weekday> {
    match code {
        "M" => Some(Weekday::Mon),
        "Tu" => Some(Weekday::Tue),
        "W" => Some(Weekday::Wed),
        "Th" => Some(Weekday::Thu),
        "F" => Some(Weekday::Fri),
        "Sa" => Some(Weekday::Sat),
        "Su" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Parses a single day, either a day name or a one-day registrar code.
pub fn parse_day(value: &str) -> Result<Weekday, ScheduleError> {
    let trimmed = value.trim();
    day_from_code(trimmed)
        .or_else(|| Weekday::from_str(trimmed).ok())
        .ok_or_else(|| ScheduleError::InvalidDay {
            value: value.to_string(),
        })
}

/// Parses a day specification into the list of days it names.
///
/// Comma- or whitespace-separated lists are parsed item by item; anything
/// else is tried as a single day and then as a compact day pattern. Repeated
/// days are kept once, in first-seen order.
pub fn parse_days(value: &str) -> Result<Vec<Weekday>, ScheduleError> {
    let trimmed = value.trim();
    let invalid = || ScheduleError::InvalidDay {
        value: value.to_string(),
    };

    let is_list = trimmed.contains(',') || trimmed.contains(char::is_whitespace);
    let parsed: Vec<Weekday> = if is_list {
        trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(parse_day)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?
    } else if let Ok(day) = parse_day(trimmed) {
        vec![day]
    } else if DAY_PATTERN_REGEX.is_match(trimmed) {
        DAY_CODE_REGEX
            .find_iter(trimmed)
            .filter_map(|m| day_from_code(m.as_str()))
            .collect()
    } else {
        return Err(invalid());
    };

    if parsed.is_empty() {
        return Err(invalid());
    }

    Ok(dedup_days(parsed))
}

fn dedup_days(parsed: impl IntoIterator<Item = Weekday>) -> Vec<Weekday> {
    let mut days = Vec::new();
    for day in parsed {
        if !days.contains(&day) {
            days.push(day);
        }
    }
    days
}

/// Meeting days as supplied by the caller: one day or pattern string, or a
/// list of them. Kept unparsed so a bad value is reported with the rest of the
/// input's problems instead of failing the whole request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DaysSpec {
    One(String),
    Many(Vec<String>),
}

impl DaysSpec {
    /// Parses every entry, keeping repeated days once in first-seen order.
    pub fn parse(&self) -> Result<Vec<Weekday>, ScheduleError> {
        match self {
            DaysSpec::One(value) => parse_days(value),
            DaysSpec::Many(values) => {
                if values.is_empty() {
                    return Err(ScheduleError::InvalidDay {
                        value: "[]".to_string(),
                    });
                }
                let mut all = Vec::new();
                for value in values {
                    all.extend(parse_days(value)?);
                }
                Ok(dedup_days(all))
            }
        }
    }
}

impl From<Vec<Weekday>> for DaysSpec {
    fn from(days: Vec<Weekday>) -> Self {
        DaysSpec::Many(days.into_iter().map(|d| day_name(d).to_string()).collect())
    }
}

impl From<&str> for DaysSpec {
    fn from(value: &str) -> Self {
        DaysSpec::One(value.to_string())
    }
}
