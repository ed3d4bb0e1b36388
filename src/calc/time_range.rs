use crate::calc::day_matcher::DayMatcher;
use crate::calc::error::ScheduleError;
use crate::calc::holiday_calc::HolidayCalculator;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

pub const DEFAULT_START: &str = "00:00";
pub const DEFAULT_END: &str = "23:59";

static HH_MM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").expect("Invalid time regex"));

const OPEN: &str = "open";
const CLOSED: &str = "closed";
const WEEK: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// What a rule says once it applies to a day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hours {
    Open,
    Closed,
    /// Inclusive on both ends, minute resolution.
    Window { start: NaiveTime, end: NaiveTime },
}

impl Hours {
    /// `start` may be a sentinel, in which case `end` is not looked at.
    pub fn parse(start: &str, end: &str) -> Result<Self, ScheduleError> {
        match start.trim() {
            OPEN => Ok(Hours::Open),
            CLOSED => Ok(Hours::Closed),
            start => Ok(Hours::Window {
                start: parse_hh_mm(start)?,
                end: parse_hh_mm(end.trim())?,
            }),
        }
    }

    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        match self {
            Hours::Closed => false,
            Hours::Open => true,
            Hours::Window { start, end } => {
                // Seconds are dropped, so 17:00:45 still counts as 17:00.
                let minute = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time);
                *start <= minute && minute <= *end
            }
        }
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hours::Open => f.write_str(OPEN),
            Hours::Closed => f.write_str(CLOSED),
            Hours::Window { start, end } => {
                write!(f, "{} - {}", start.format("%H:%M"), end.format("%H:%M"))
            }
        }
    }
}

/// Strict zero-padded 24-hour "HH:MM".
fn parse_hh_mm(value: &str) -> Result<NaiveTime, ScheduleError> {
    if !HH_MM.is_match(value) {
        return Err(ScheduleError::InvalidTime(value.to_string()));
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| ScheduleError::InvalidTime(value.to_string()))
}

/// A schedule rule: the days it covers and the hours it grants on them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeRange {
    days: Vec<DayMatcher>,
    hours: Hours,
}

impl TimeRange {
    pub fn new(days: Vec<DayMatcher>, hours: Hours) -> Result<Self, ScheduleError> {
        if days.is_empty() {
            return Err(ScheduleError::NoDays);
        }
        Ok(TimeRange { days, hours })
    }

    /// Weekday-only rule; an empty list means every day of the week.
    pub fn from_weekdays(names: &[&str], hours: Hours) -> Result<Self, ScheduleError> {
        let names = if names.is_empty() { &WEEK[..] } else { names };
        let days = names
            .iter()
            .map(|name| DayMatcher::parse(name))
            .collect::<Result<Vec<_>, _>>()?;
        TimeRange::new(days, hours)
    }

    pub fn days(&self) -> &[DayMatcher] {
        &self.days
    }

    pub fn hours(&self) -> Hours {
        self.hours
    }

    pub fn applies_to(&self, date: NaiveDate, calculator: &HolidayCalculator) -> bool {
        self.days.iter().any(|day| day.matches(date, calculator))
    }

    /// Does not check `applies_to`; callers do that first.
    pub fn is_open(&self, time: NaiveTime) -> bool {
        self.hours.is_open_at(time)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days: Vec<String> = self.days.iter().map(|d| d.to_string()).collect();
        write!(f, "TimeRange: {}, {}", days.join(", "), self.hours)
    }
}

/// Outcome of evaluating a schedule at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub open: bool,
    /// Index of the rule that decided, if any rule applied.
    pub rule: Option<usize>,
}

/// Ordered schedule rules, first applicable rule wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeRangeContainer {
    ranges: Vec<TimeRange>,
}

impl TimeRangeContainer {
    pub fn new(ranges: Vec<TimeRange>) -> Self {
        TimeRangeContainer { ranges }
    }

    pub fn ranges(&self) -> &[TimeRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Evaluates the local wall-clock date and time of `at`.
    pub fn matches<Tz: TimeZone>(&self, at: &DateTime<Tz>, calculator: &HolidayCalculator) -> bool {
        self.evaluate(at, calculator).open
    }

    /// Empty schedule is open; a schedule where no rule applies is closed.
    pub fn evaluate<Tz: TimeZone>(
        &self,
        at: &DateTime<Tz>,
        calculator: &HolidayCalculator,
    ) -> Verdict {
        if self.ranges.is_empty() {
            return Verdict { open: true, rule: None };
        }
        let local = at.naive_local();
        self.ranges
            .iter()
            .position(|range| range.applies_to(local.date(), calculator))
            .map(|index| Verdict {
                open: self.ranges[index].is_open(local.time()),
                rule: Some(index),
            })
            .unwrap_or(Verdict { open: false, rule: None })
    }
}

impl fmt::Display for TimeRangeContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranges: Vec<String> = self.ranges.iter().map(|r| r.to_string()).collect();
        f.write_str(&ranges.join(", "))
    }
}
