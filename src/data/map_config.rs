use crate::calc::time_range::{DEFAULT_END, DEFAULT_START};
use crate::calc::{
    DayMatcher, HolidayCalculator, Hours, ScheduleError, TimeRange, TimeRangeContainer, Verdict,
};
use crate::data::geoloc_object::{Coordinates, GeolocatableObject};
use crate::data::persistence::Persistable;
use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::{debug, error, warn};

pub const DEFAULT_CUSTOM_MESSAGE: &str = "Aucune donnée de géolocalisation";
pub const DEFAULT_TIMEZONE: &str = "Europe/Paris";
const DEFAULT_ZOOM_LEVEL: u8 = 12;
const DEFAULT_REFRESH_INTERVAL_MS: u64 = 5000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Map config \"{0}\" not found.")]
    MapNotFound(String),

    #[error("Map config \"{map}\" has an unknown timezone \"{timezone}\"")]
    InvalidTimezone { map: String, timezone: String },
}

/// One map as written in the configuration document. A malformed value is
/// logged and read as absent, so it cannot take sibling maps down with it.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct MapConfigEntry {
    #[serde(rename = "mapName", default, deserialize_with = "lenient")]
    pub map_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub default_latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub default_longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub default_zoom_level: Option<u8>,
    /// Milliseconds.
    #[serde(default, deserialize_with = "lenient")]
    pub refresh_interval: Option<u64>,
    /// Only a string overrides the default message.
    #[serde(default)]
    pub custom_message: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub timezone: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub objects: Option<Vec<GeolocatableObject>>,
    /// Kept raw so one malformed rule does not reject the whole map.
    #[serde(default, deserialize_with = "lenient")]
    pub time_ranges: Option<Vec<serde_json::Value>>,
}

/// Null and values of the wrong shape both read as `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match T::deserialize(&value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            warn!(value = %value, error = %e, "ignoring malformed map setting");
            Ok(None)
        }
    }
}

/// The full configuration document: a list of maps.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(from = "Vec<serde_json::Value>")]
pub struct MapConfigDocument {
    pub maps: Vec<MapConfigEntry>,
}

impl From<Vec<serde_json::Value>> for MapConfigDocument {
    fn from(raw: Vec<serde_json::Value>) -> Self {
        let maps = raw
            .iter()
            .enumerate()
            .filter_map(|(index, value)| match MapConfigEntry::deserialize(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    error!(index, error = %e, "failed to parse map entry, skipping");
                    None
                }
            })
            .collect();
        MapConfigDocument { maps }
    }
}

impl Persistable for MapConfigDocument {}

#[derive(Deserialize, Debug)]
struct TimeRangeEntry {
    /// Absent means every day of the week; an explicit null means none.
    #[serde(default, deserialize_with = "null_as_no_days")]
    days: Option<Vec<String>>,
    #[serde(rename = "startTime", default = "default_start")]
    start_time: String,
    #[serde(rename = "endTime", default = "default_end")]
    end_time: String,
}

fn null_as_no_days<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default()))
}

fn default_start() -> String {
    DEFAULT_START.to_string()
}

fn default_end() -> String {
    DEFAULT_END.to_string()
}

/// A resolved, immutable map configuration.
#[derive(Clone, Debug)]
pub struct MapConfig {
    pub map_name: String,
    pub default_coordinates: Coordinates,
    pub default_zoom_level: u8,
    pub refresh_interval: u64,
    pub custom_message: String,
    pub timezone: Tz,
    pub schedule: TimeRangeContainer,
    pub objects: Vec<GeolocatableObject>,
}

impl MapConfig {
    /// Evaluates the schedule on the map's own wall clock.
    pub fn evaluate<T: TimeZone>(&self, at: &DateTime<T>, calculator: &HolidayCalculator) -> Verdict {
        self.schedule
            .evaluate(&at.with_timezone(&self.timezone), calculator)
    }
}

#[derive(Debug)]
pub struct MapConfigBuilder {
    document: MapConfigDocument,
}

impl MapConfigBuilder {
    pub fn new(document: MapConfigDocument) -> Self {
        MapConfigBuilder { document }
    }

    pub fn map_names(&self) -> impl Iterator<Item = &str> {
        self.document
            .maps
            .iter()
            .filter_map(|m| m.map_name.as_deref())
            .filter(|name| !name.is_empty())
    }

    pub fn build(&self, map_name: &str) -> Result<MapConfig, ConfigError> {
        let entry = self
            .document
            .maps
            .iter()
            .find(|m| !map_name.is_empty() && m.map_name.as_deref() == Some(map_name))
            .ok_or_else(|| ConfigError::MapNotFound(map_name.to_string()))?;

        let timezone_name = entry.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE);
        let timezone: Tz = timezone_name
            .parse()
            .map_err(|_| ConfigError::InvalidTimezone {
                map: map_name.to_string(),
                timezone: timezone_name.to_string(),
            })?;

        let custom_message = match &entry.custom_message {
            Some(serde_json::Value::String(message)) => message.clone(),
            _ => DEFAULT_CUSTOM_MESSAGE.to_string(),
        };

        let config = MapConfig {
            map_name: map_name.to_string(),
            default_coordinates: Coordinates::new(
                entry.default_latitude.unwrap_or_default(),
                entry.default_longitude.unwrap_or_default(),
            ),
            default_zoom_level: entry.default_zoom_level.unwrap_or(DEFAULT_ZOOM_LEVEL),
            refresh_interval: entry.refresh_interval.unwrap_or(DEFAULT_REFRESH_INTERVAL_MS),
            custom_message,
            timezone,
            schedule: build_schedule(map_name, entry.time_ranges.as_deref().unwrap_or_default()),
            objects: entry.objects.clone().unwrap_or_default(),
        };
        debug!(map = map_name, rules = config.schedule.ranges().len(), "map config resolved");
        Ok(config)
    }
}

/// Builds the rules of one map, logging and skipping any malformed rule.
fn build_schedule(map_name: &str, raw_ranges: &[serde_json::Value]) -> TimeRangeContainer {
    let mut ranges = Vec::with_capacity(raw_ranges.len());
    for (index, raw) in raw_ranges.iter().enumerate() {
        let entry: TimeRangeEntry = match serde_json::from_value(raw.clone()) {
            Ok(entry) => entry,
            Err(e) => {
                error!(map = map_name, index, error = %e, "failed to parse time range, skipping");
                continue;
            }
        };
        match build_range(&entry) {
            Ok(range) => ranges.push(range),
            Err(ScheduleError::NoDays) => {
                warn!(map = map_name, index, "time range has no valid days, skipping");
            }
            Err(e) => {
                error!(map = map_name, index, error = %e, "failed to parse time range, skipping");
            }
        }
    }
    TimeRangeContainer::new(ranges)
}

fn build_range(entry: &TimeRangeEntry) -> Result<TimeRange, ScheduleError> {
    let hours = Hours::parse(&entry.start_time, &entry.end_time)?;
    let Some(tokens) = &entry.days else {
        return TimeRange::from_weekdays(&[], hours);
    };
    let days = tokens
        .iter()
        .filter_map(|token| match DayMatcher::parse(token) {
            Ok(day) => Some(day),
            Err(e) => {
                warn!(day = %token, error = %e, "invalid day format");
                None
            }
        })
        .collect();
    TimeRange::new(days, hours)
}
