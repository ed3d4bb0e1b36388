use thiserror::Error;

/// Errors raised while building schedule rules.
///
/// Evaluation never fails; these only surface while a configuration is resolved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error(
        "invalid day format: '{0}'. Expected a day name (Monday), MM-DD (05-01), \
         YYYY-MM-DD (2025-12-25), a holiday keyword (labor_day) or 'french_holidays'"
    )]
    InvalidDayMatcher(String),

    #[error("invalid time '{0}': expected HH:MM, 'open' or 'closed'")]
    InvalidTime(String),

    #[error("time range has no valid days")]
    NoDays,
}
