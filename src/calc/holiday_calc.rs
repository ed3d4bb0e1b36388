use crate::data::Holiday;
use chrono::{Datelike, Days, NaiveDate};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Computes French public holiday dates, memoized per (holiday, year).
#[derive(Debug, Default)]
pub struct HolidayCalculator {
    cache: Mutex<HashMap<(Holiday, i32), NaiveDate>>,
}

impl HolidayCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` only when the date falls outside chrono's calendar.
    pub fn date_of(&self, holiday: Holiday, year: i32) -> Option<NaiveDate> {
        if let Some(date) = self.lock().get(&(holiday, year)) {
            return Some(*date);
        }
        // Computed outside the lock; a racing insert stores the same value.
        let date = compute(holiday, year)?;
        self.lock().insert((holiday, year), date);
        Some(date)
    }

    /// Returns the holiday falling on `date`, if any.
    pub fn holiday_on(&self, date: NaiveDate) -> Option<Holiday> {
        Holiday::ALL
            .into_iter()
            .find(|h| self.date_of(*h, date.year()) == Some(date))
    }

    /// All holidays of `year`, sorted by date.
    pub fn holidays_in(&self, year: i32) -> Vec<(Holiday, NaiveDate)> {
        let mut list: Vec<(Holiday, NaiveDate)> = Holiday::ALL
            .into_iter()
            .filter_map(|h| self.date_of(h, year).map(|date| (h, date)))
            .collect();
        list.sort_by_key(|(_, d)| *d);
        list
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<(Holiday, i32), NaiveDate>> {
        // Cached values are deterministic, so a poisoned map is still valid.
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn compute(holiday: Holiday, year: i32) -> Option<NaiveDate> {
    match (holiday.fixed_month_day(), holiday.easter_offset()) {
        (Some((month, day)), _) => NaiveDate::from_ymd_opt(year, month, day),
        (None, Some(days)) => easter_sunday(year)?.checked_add_days(Days::new(days)),
        (None, None) => None,
    }
}

/// Anonymous Gregorian algorithm (Meeus/Jones/Butcher).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}
