//! Partially specified, hierarchical time values
//!
//! A [`TimeValue`] holds an optional value per [`TimeKind`]. Absent
//! components are either inherited from an enclosing scope or genuinely
//! unspecified. Values double as the keys of segment maps, so equality,
//! hashing and ordering only look at the start components; a period compares
//! by its start.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::kind::{ordinal, TimeKind, MONTHS};
use crate::error::TimeError;

/// The end of a period
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    /// Started but not closed yet (`...` after the time literal)
    Open,
    /// Closed at the given instant
    Until(Box<TimeValue>),
}

#[derive(Debug, Clone, Default)]
pub struct TimeValue {
    components: [Option<u32>; 5],
    period: Option<Period>,
}

impl TimeValue {
    /// The unconstrained value: no components, no period
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay explicit components onto an optional parent
    ///
    /// Each kind takes the explicit text, parsed with the kind's grammar, if
    /// present; else the parent's value; else stays absent. Later entries for
    /// the same kind win. The parent's period is never inherited.
    pub fn combine<I, S>(explicit: I, parent: Option<&TimeValue>) -> Result<Self, TimeError>
    where
        I: IntoIterator<Item = (TimeKind, S)>,
        S: AsRef<str>,
    {
        let mut components = parent.map(|p| p.components).unwrap_or_default();
        for (kind, text) in explicit {
            components[kind.index()] = Some(kind.parse_value(text.as_ref())?);
        }
        Ok(Self {
            components,
            period: None,
        })
    }

    /// The current local time: year, month, day of month and clock time
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    /// Capture a calendar instant the same way [`TimeValue::now`] does
    ///
    /// The weekday is deliberately left out so the value renders to a literal
    /// that parses back to the same components.
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        let explicit = [
            (TimeKind::Year, format!("{:04}", datetime.year())),
            (TimeKind::Month, MONTHS[datetime.month0() as usize].to_string()),
            (TimeKind::DayOfMonth, ordinal(datetime.day())),
            (
                TimeKind::ClockTime,
                format!("{}:{:02}", datetime.hour(), datetime.minute()),
            ),
        ];

        let mut value = Self::new();
        for (kind, text) in explicit {
            // Years outside 0..=9999 have no literal form; keep them numerically
            let parsed = kind.parse_value(&text).ok().or_else(|| match kind {
                TimeKind::Year => u32::try_from(datetime.year()).ok(),
                _ => None,
            });
            value.components[kind.index()] = parsed;
        }
        value
    }

    pub fn get(&self, kind: TimeKind) -> Option<u32> {
        self.components[kind.index()]
    }

    /// Copy of this value with one component set
    pub fn with(mut self, kind: TimeKind, value: u32) -> Self {
        self.components[kind.index()] = Some(value);
        self
    }

    /// Present components as `(kind, value)` pairs, in rank order
    pub fn components(&self) -> impl Iterator<Item = (TimeKind, u32)> + '_ {
        TimeKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|value| (kind, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.components.iter().all(Option::is_none)
    }

    /// Fill absent components from `scope`, including those of a period end
    pub fn inherit(&self, scope: &TimeValue) -> Self {
        let mut components = self.components;
        for (slot, inherited) in components.iter_mut().zip(scope.components) {
            if slot.is_none() {
                *slot = inherited;
            }
        }
        let period = match &self.period {
            Some(Period::Until(end)) => Some(Period::Until(Box::new(end.inherit(scope)))),
            other => other.clone(),
        };
        Self { components, period }
    }

    /// True iff every component `self` specifies is specified equally by `other`
    pub fn contains(&self, other: &TimeValue) -> bool {
        self.components
            .iter()
            .zip(other.components.iter())
            .all(|(mine, theirs)| mine.is_none() || mine == theirs)
    }

    /// Weekday and day of month are both present
    pub fn conflicts(&self) -> bool {
        self.get(TimeKind::Weekday).is_some() && self.get(TimeKind::DayOfMonth).is_some()
    }

    /// Explicit components of one literal must strictly increase in rank
    pub fn is_rank_increasing(kinds: &[TimeKind]) -> bool {
        kinds.windows(2).all(|pair| pair[0].rank() < pair[1].rank())
    }

    // ===== Periods =====

    pub fn is_period(&self) -> bool {
        self.period.is_some()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.period, Some(Period::Open))
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn period_end(&self) -> Option<&TimeValue> {
        match &self.period {
            Some(Period::Until(end)) => Some(end),
            _ => None,
        }
    }

    /// Copy of this value closed at `end`
    pub fn with_period_end(&self, end: TimeValue) -> Self {
        Self {
            components: self.components,
            period: Some(Period::Until(Box::new(end.start()))),
        }
    }

    /// Copy of this value marked as an open period
    pub fn with_open_period(&self) -> Self {
        Self {
            components: self.components,
            period: Some(Period::Open),
        }
    }

    /// Copy of this value without its period
    pub fn start(&self) -> Self {
        Self {
            components: self.components,
            period: None,
        }
    }

    /// The period end sorts before the start
    ///
    /// Components the end leaves out are taken from the start, so `2nd 10:00`
    /// after `June 1st 09:00` compares as `June 2nd 10:00`.
    pub fn ends_before_start(&self) -> bool {
        let start = self.start();
        self.period_end().is_some_and(|end| end.inherit(&start) < start)
    }

    /// Whole minutes between start and period end
    ///
    /// Defined when both ends have clock times and either share year, month
    /// and day of month, or are both fully dated. Components the end leaves
    /// out are taken from the start. A period that ends before it starts has
    /// no interval.
    pub fn interval_minutes(&self) -> Option<i64> {
        if self.ends_before_start() {
            return None;
        }
        let end = self.period_end()?.inherit(&self.start());
        let start_clock = i64::from(self.get(TimeKind::ClockTime)?);
        let end_clock = i64::from(end.get(TimeKind::ClockTime)?);

        let same_day = [TimeKind::Year, TimeKind::Month, TimeKind::DayOfMonth]
            .into_iter()
            .all(|kind| self.get(kind) == end.get(kind));
        if same_day {
            return Some(end_clock - start_clock);
        }

        let start = self.naive_date()?.and_hms_opt(0, 0, 0)?;
        let finish = end.naive_date()?.and_hms_opt(0, 0, 0)?;
        Some((finish - start).num_minutes() + end_clock - start_clock)
    }

    fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::try_from(self.get(TimeKind::Year)?).ok()?,
            self.get(TimeKind::Month)?,
            self.get(TimeKind::DayOfMonth)?,
        )
    }

    // ===== Rendering =====

    /// Render the components `scope` leaves unspecified
    ///
    /// Periods append `-` and the end, or `...` while still open. An end that
    /// only moves the clock renders as the `HH:MM-HH:MM` shorthand. A value
    /// that adds nothing to its scope renders in full, since a literal needs
    /// at least one component. A value, or period end, that `scope` does not
    /// contain renders in full.
    pub fn format(&self, scope: &TimeValue) -> String {
        let unscoped = TimeValue::new();
        let start_scope = if scope.contains(self) { scope } else { &unscoped };
        let mut parts = self.format_parts(start_scope);
        if parts.is_empty() {
            parts = self.format_parts(&unscoped);
        }
        let mut out = parts.join(" ");

        match &self.period {
            None => {}
            Some(Period::Open) => out.push_str("..."),
            Some(Period::Until(end)) => {
                out.push('-');
                if self.is_clock_shorthand(end, scope) {
                    if let Some(clock) = end.get(TimeKind::ClockTime) {
                        out.push_str(&TimeKind::ClockTime.render_value(clock));
                    }
                } else {
                    let end_scope = if scope.contains(end) { scope } else { &unscoped };
                    let end_parts = end.format_parts(end_scope);
                    if end_parts.is_empty() {
                        out.push_str(&end.format_parts(&unscoped).join(" "));
                    } else {
                        out.push_str(&end_parts.join(" "));
                    }
                }
            }
        }
        out
    }

    fn format_parts(&self, scope: &TimeValue) -> Vec<String> {
        self.components()
            .filter(|(kind, _)| scope.get(*kind).is_none())
            .map(|(kind, value)| kind.render_value(value))
            .collect()
    }

    fn is_clock_shorthand(&self, end: &TimeValue, scope: &TimeValue) -> bool {
        scope.get(TimeKind::ClockTime).is_none()
            && self.get(TimeKind::ClockTime).is_some()
            && end.get(TimeKind::ClockTime).is_some()
            && TimeKind::ALL
                .into_iter()
                .filter(|kind| *kind != TimeKind::ClockTime)
                .all(|kind| self.get(kind) == end.get(kind))
    }
}

impl PartialEq for TimeValue {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for TimeValue {}

impl Hash for TimeValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.components.hash(state);
    }
}

impl PartialOrd for TimeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeValue {
    /// Lexicographic over year, month, day of month, weekday, clock time,
    /// with an absent component before any concrete one
    fn cmp(&self, other: &Self) -> Ordering {
        self.components.cmp(&other.components)
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&TimeValue::new()))
    }
}

impl Serialize for TimeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let render = |kind: TimeKind| self.get(kind).map(|value| kind.render_value(value));
        let mut state = serializer.serialize_struct("TimeValue", 7)?;
        state.serialize_field("year", &render(TimeKind::Year))?;
        state.serialize_field("month", &render(TimeKind::Month))?;
        state.serialize_field("day", &render(TimeKind::DayOfMonth))?;
        state.serialize_field("weekday", &render(TimeKind::Weekday))?;
        state.serialize_field("clock", &render(TimeKind::ClockTime))?;
        state.serialize_field("open", &self.is_open())?;
        state.serialize_field("end", &self.period_end())?;
        state.end()
    }
}
