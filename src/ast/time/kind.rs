//! Time component kinds and their literal grammars
//!
//! Every component is stored as a small integer: the year itself, month
//! 1-12, day of month 1-31, weekday 0-6 (Monday is 0), and clock time as
//! minutes since midnight.

use serde::Serialize;
use std::fmt;

use crate::error::TimeError;

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// The kinds of component a time literal can fix
///
/// Declaration order is storage and comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TimeKind {
    Year,
    Month,
    DayOfMonth,
    Weekday,
    ClockTime,
}

impl TimeKind {
    pub const ALL: [TimeKind; 5] = [
        TimeKind::Year,
        TimeKind::Month,
        TimeKind::DayOfMonth,
        TimeKind::Weekday,
        TimeKind::ClockTime,
    ];

    /// Nesting rank; day of month and weekday share a rank
    pub fn rank(self) -> u8 {
        match self {
            TimeKind::Year => 0,
            TimeKind::Month => 1,
            TimeKind::DayOfMonth | TimeKind::Weekday => 2,
            TimeKind::ClockTime => 3,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            TimeKind::Year => "year",
            TimeKind::Month => "month",
            TimeKind::DayOfMonth => "day of month",
            TimeKind::Weekday => "weekday",
            TimeKind::ClockTime => "clock time",
        }
    }

    /// Parse component text with this kind's grammar
    pub fn parse_value(self, text: &str) -> Result<u32, TimeError> {
        match self {
            TimeKind::Year => parse_year(text),
            TimeKind::Month => parse_month(text),
            TimeKind::DayOfMonth => parse_day(text),
            TimeKind::Weekday => parse_weekday(text),
            TimeKind::ClockTime => parse_clock(text),
        }
    }

    /// Render a stored value back to the text the tokenizer accepts
    pub fn render_value(self, value: u32) -> String {
        match self {
            TimeKind::Year => format!("{:04}", value),
            TimeKind::Month => MONTHS
                .get((value as usize).wrapping_sub(1))
                .map(|name| name.to_string())
                .unwrap_or_else(|| value.to_string()),
            TimeKind::DayOfMonth => ordinal(value),
            TimeKind::Weekday => WEEKDAYS
                .get(value as usize)
                .map(|name| name.to_string())
                .unwrap_or_else(|| value.to_string()),
            TimeKind::ClockTime => format!("{:02}:{:02}", value / 60, value % 60),
        }
    }
}

impl fmt::Display for TimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// English ordinal for a day of month: 1st, 2nd, 3rd, 4th, 11th, 21st
pub fn ordinal(day: u32) -> String {
    format!("{}{}", day, ordinal_suffix(day))
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn parse_year(text: &str) -> Result<u32, TimeError> {
    if text.len() != 4 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::InvalidYear(text.to_string()));
    }
    text.parse()
        .map_err(|_| TimeError::InvalidYear(text.to_string()))
}

fn parse_month(text: &str) -> Result<u32, TimeError> {
    MONTHS
        .iter()
        .position(|name| *name == text)
        .map(|i| i as u32 + 1)
        .ok_or_else(|| TimeError::InvalidMonth(text.to_string()))
}

fn parse_day(text: &str) -> Result<u32, TimeError> {
    let invalid = || TimeError::InvalidDay(text.to_string());
    let split = text
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(invalid)?;
    let (digits, suffix) = text.split_at(split);
    let day: u32 = digits.parse().map_err(|_| invalid())?;

    if !(1..=31).contains(&day) || suffix != ordinal_suffix(day) {
        return Err(invalid());
    }
    Ok(day)
}

fn parse_weekday(text: &str) -> Result<u32, TimeError> {
    WEEKDAYS
        .iter()
        .position(|name| *name == text)
        .map(|i| i as u32)
        .ok_or_else(|| TimeError::InvalidWeekday(text.to_string()))
}

fn parse_clock(text: &str) -> Result<u32, TimeError> {
    let invalid = || TimeError::InvalidClock(text.to_string());
    let (hours, minutes) = text.split_once(':').ok_or_else(invalid)?;

    if hours.is_empty()
        || hours.len() > 2
        || minutes.len() != 2
        || !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}
