use crate::calc::error::ScheduleError;
use crate::calc::holiday_calc::HolidayCalculator;
use crate::data::Holiday;
use chrono::{Datelike, NaiveDate, Weekday};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

const ALL_HOLIDAYS_KEYWORD: &str = "french_holidays";

static FULL_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Invalid full date regex"));
static MONTH_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}-[0-9]{2}$").expect("Invalid month-day regex"));

/// One day specifier of a schedule rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DayMatcher {
    DayOfWeek(Weekday),
    /// "MM-DD", any year.
    FixedMonthDay(String),
    /// "YYYY-MM-DD".
    FullDate(String),
    Holiday(Holiday),
    AllHolidays,
}

impl DayMatcher {
    /// Parses a single token. Literal keyword first, then the numeric date
    /// shapes (longest first), then holiday keywords, then weekday names.
    pub fn parse(token: &str) -> Result<Self, ScheduleError> {
        let token = token.trim();

        if token.eq_ignore_ascii_case(ALL_HOLIDAYS_KEYWORD) {
            return Ok(DayMatcher::AllHolidays);
        }
        if FULL_DATE.is_match(token) {
            return Ok(DayMatcher::FullDate(token.to_string()));
        }
        if MONTH_DAY.is_match(token) {
            return Ok(DayMatcher::FixedMonthDay(token.to_string()));
        }
        if let Some(holiday) = Holiday::from_keyword(token) {
            return Ok(DayMatcher::Holiday(holiday));
        }
        if let Some(weekday) = parse_weekday_name(token) {
            return Ok(DayMatcher::DayOfWeek(weekday));
        }

        Err(ScheduleError::InvalidDayMatcher(token.to_string()))
    }

    pub fn matches(&self, date: NaiveDate, calculator: &HolidayCalculator) -> bool {
        match self {
            DayMatcher::DayOfWeek(weekday) => date.weekday() == *weekday,
            DayMatcher::FixedMonthDay(month_day) => date.format("%m-%d").to_string() == *month_day,
            DayMatcher::FullDate(full) => date.format("%Y-%m-%d").to_string() == *full,
            DayMatcher::Holiday(holiday) => calculator.date_of(*holiday, date.year()) == Some(date),
            DayMatcher::AllHolidays => calculator.holiday_on(date).is_some(),
        }
    }
}

impl fmt::Display for DayMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayMatcher::DayOfWeek(weekday) => f.write_str(weekday_name(*weekday)),
            DayMatcher::FixedMonthDay(value) | DayMatcher::FullDate(value) => f.write_str(value),
            DayMatcher::Holiday(holiday) => write!(f, "{}", holiday),
            DayMatcher::AllHolidays => f.write_str(ALL_HOLIDAYS_KEYWORD),
        }
    }
}

/// Capitalized English name, e.g. "Monday".
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Full English weekday names, any case.
fn parse_weekday_name(token: &str) -> Option<Weekday> {
    const WEEK: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    WEEK.into_iter()
        .find(|w| weekday_name(*w).eq_ignore_ascii_case(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_all_holidays_literal() {
        assert_eq!(DayMatcher::parse("french_holidays").unwrap(), DayMatcher::AllHolidays);
        assert_eq!(DayMatcher::parse("  FRENCH_Holidays ").unwrap(), DayMatcher::AllHolidays);
    }

    #[test]
    fn test_parse_full_date_before_month_day() {
        assert_eq!(
            DayMatcher::parse("2025-12-24").unwrap(),
            DayMatcher::FullDate("2025-12-24".to_string())
        );
        assert_eq!(
            DayMatcher::parse("05-01").unwrap(),
            DayMatcher::FixedMonthDay("05-01".to_string())
        );
    }

    #[test]
    fn test_parse_holiday_keyword_case_insensitive() {
        assert_eq!(
            DayMatcher::parse("Bastille_Day").unwrap(),
            DayMatcher::Holiday(Holiday::BastilleDay)
        );
    }

    #[test]
    fn test_parse_weekday_normalizes_case() {
        assert_eq!(DayMatcher::parse("monday").unwrap(), DayMatcher::DayOfWeek(Weekday::Mon));
        assert_eq!(DayMatcher::parse("SUNDAY").unwrap(), DayMatcher::DayOfWeek(Weekday::Sun));
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        assert_eq!(
            DayMatcher::parse("invalid_format"),
            Err(ScheduleError::InvalidDayMatcher("invalid_format".to_string()))
        );
        assert!(DayMatcher::parse("").is_err());
        assert!(DayMatcher::parse("mon").is_err());
        assert!(DayMatcher::parse("5-1").is_err());
        assert!(DayMatcher::parse("2025-1-01").is_err());
        assert!(DayMatcher::parse("20251-01-01").is_err());
        assert!(DayMatcher::parse("05-01\n").is_ok());
        assert!(DayMatcher::parse("05/01").is_err());
    }

    #[test]
    fn test_parse_date_shapes_need_ascii_digits() {
        assert!(DayMatcher::parse("٠٥-٠١").is_err());
        assert!(DayMatcher::parse("２０２５-０１-０１").is_err());
        assert!(DayMatcher::parse("05-1a").is_err());
    }

    #[test]
    fn test_display_reproduces_normalized_token() {
        let cases = [
            ("tuesday", "Tuesday"),
            ("07-14", "07-14"),
            ("2025-12-25", "2025-12-25"),
            ("LABOR_DAY", "labor_day"),
            ("French_Holidays", "french_holidays"),
        ];
        for (input, normalized) in cases {
            assert_eq!(DayMatcher::parse(input).unwrap().to_string(), normalized);
        }
    }

    #[test]
    fn test_day_of_week_matches() {
        let calc = HolidayCalculator::new();
        let tuesday = DayMatcher::parse("Tuesday").unwrap();
        assert!(tuesday.matches(d(2025, 6, 10), &calc));
        assert!(!tuesday.matches(d(2025, 6, 11), &calc));
    }

    #[test]
    fn test_fixed_month_day_matches_any_year() {
        let calc = HolidayCalculator::new();
        let may_first = DayMatcher::parse("05-01").unwrap();
        assert!(may_first.matches(d(2025, 5, 1), &calc));
        assert!(may_first.matches(d(2031, 5, 1), &calc));
        assert!(!may_first.matches(d(2025, 5, 2), &calc));
    }

    #[test]
    fn test_full_date_matches_only_that_year() {
        let calc = HolidayCalculator::new();
        let eve = DayMatcher::parse("2025-12-24").unwrap();
        assert!(eve.matches(d(2025, 12, 24), &calc));
        assert!(!eve.matches(d(2026, 12, 24), &calc));
    }

    #[test]
    fn test_holiday_matches_moveable_date() {
        let calc = HolidayCalculator::new();
        let easter_monday = DayMatcher::parse("easter_monday").unwrap();
        assert!(easter_monday.matches(d(2025, 4, 21), &calc));
        assert!(easter_monday.matches(d(2026, 4, 6), &calc));
        assert!(!easter_monday.matches(d(2025, 4, 20), &calc));
    }

    #[test]
    fn test_all_holidays_matches_any_holiday() {
        let calc = HolidayCalculator::new();
        let any = DayMatcher::AllHolidays;
        assert!(any.matches(d(2025, 5, 1), &calc));
        assert!(any.matches(d(2025, 6, 9), &calc));
        assert!(!any.matches(d(2025, 6, 15), &calc));
    }
}
