use crate::calc::{HolidayCalculator, Verdict};
use crate::data::{MapConfig, MapConfigBuilder};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::info;

pub fn run(builder: &MapConfigBuilder, map_name: &str, at: Option<&str>) -> Result<()> {
    let config = builder.build(map_name)?;
    let at = resolve_instant(at, config.timezone)?;
    let calculator = HolidayCalculator::new();
    let verdict = config.evaluate(&at, &calculator);

    if !verdict.open {
        info!(map = %config.map_name, schedule = %config.schedule, "out of time ranges");
    }

    write_status(&config, &at, verdict, &mut std::io::stdout())
}

/// RFC 3339 instants are taken as given; naive "YYYY-MM-DDTHH:MM" is read on
/// the map's wall clock. `None` means now.
pub(crate) fn resolve_instant(raw: Option<&str>, tz: Tz) -> Result<DateTime<Tz>> {
    let Some(raw) = raw.map(str::trim) else {
        return Ok(Utc::now().with_timezone(&tz));
    };
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&tz));
    }
    let naive = ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .with_context(|| format!("invalid instant '{}': expected RFC 3339 or YYYY-MM-DDTHH:MM", raw))?;
    match tz.from_local_datetime(&naive).earliest() {
        Some(local) => Ok(local),
        None => bail!("{} does not exist in {}", raw, tz.name()),
    }
}

pub(crate) fn write_status<W: std::io::Write>(
    config: &MapConfig,
    at: &DateTime<Tz>,
    verdict: Verdict,
    out: &mut W,
) -> Result<()> {
    let rule = match verdict.rule {
        Some(index) => format!("#{} {}", index + 1, config.schedule.ranges()[index]),
        None if config.schedule.is_empty() => "no schedule configured".to_string(),
        None => "no rule applies".to_string(),
    };

    writeln!(out, "{:<10} {}", "Map:", config.map_name)?;
    writeln!(
        out,
        "{:<10} {} ({})",
        "Time:",
        at.format("%Y-%m-%d %H:%M %A"),
        config.timezone.name()
    )?;
    writeln!(out, "{:<10} {}", "Status:", if verdict.open { "open" } else { "closed" })?;
    writeln!(out, "{:<10} {}", "Rule:", rule)?;
    if !verdict.open {
        writeln!(out, "{:<10} {}", "Message:", config.custom_message)?;
    }
    Ok(())
}
