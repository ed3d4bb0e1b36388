pub mod day_matcher;
pub mod error;
pub mod holiday_calc;
pub mod time_range;

pub use day_matcher::DayMatcher;
pub use error::ScheduleError;
pub use holiday_calc::HolidayCalculator;
pub use time_range::{Hours, TimeRange, TimeRangeContainer, Verdict};
