use crate::calc::day_matcher::weekday_name;
use crate::calc::HolidayCalculator;
use crate::data::Holiday;
use anyhow::{ensure, Result};
use chrono::{Datelike, Local, NaiveDate};

pub fn run(year: Option<i32>) -> Result<()> {
    let year = year.unwrap_or_else(|| Local::now().year());
    ensure!(
        NaiveDate::from_ymd_opt(year, 1, 1).is_some(),
        "year {} is outside the supported calendar range",
        year
    );
    let calculator = HolidayCalculator::new();
    write_holidays(year, &calculator.holidays_in(year), &mut std::io::stdout())
}

pub(crate) fn write_holidays<W: std::io::Write>(
    year: i32,
    holidays: &[(Holiday, NaiveDate)],
    out: &mut W,
) -> Result<()> {
    writeln!(out, "French public holidays {}", year)?;
    writeln!(out, "---")?;
    writeln!(
        out,
        "  {:<12} {:<10} {:<14} {:<12} {}",
        "Date", "Weekday", "Keyword", "Rule", "Name"
    )?;
    for (holiday, date) in holidays {
        writeln!(
            out,
            "  {:<12} {:<10} {:<14} {:<12} {}",
            date.format("%Y-%m-%d"),
            weekday_name(date.weekday()),
            holiday.keyword(),
            rule(*holiday),
            holiday.name()
        )?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} holiday(s)", holidays.len())?;
    Ok(())
}

fn rule(holiday: Holiday) -> String {
    let rule = if holiday.is_fixed_date() {
        holiday
            .fixed_month_day()
            .map(|(month, day)| format!("fixed {:02}-{:02}", month, day))
    } else {
        holiday.easter_offset().map(|days| format!("Easter +{}", days))
    };
    rule.unwrap_or_default()
}
