//! Normalization of heterogeneous stored timestamps.
//!
//! Date-bearing task and workspace fields arrive from storage in several
//! shapes. [`RawTimestamp`] enumerates the accepted shapes explicitly so each
//! one can be tested, and [`normalize_required`] / [`normalize_optional`]
//! turn them into canonical [`DateTime<Utc>`] values without ever failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use mockable::Clock;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Timezone-less layouts tried, in order, after RFC 3339.
const NAIVE_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A stored value that knows how to convert itself into a point in time.
///
/// Storage SDK timestamp objects implement this so they can be handed to the
/// board without first being flattened.
pub trait TimestampSource: fmt::Debug + Send + Sync {
    /// Converts the value, returning `None` when it does not denote a valid
    /// instant.
    fn to_utc(&self) -> Option<DateTime<Utc>>;
}

/// The closed set of timestamp shapes accepted from storage.
#[derive(Debug, Clone)]
pub enum RawTimestamp {
    /// Already a canonical instant.
    Native(DateTime<Utc>),
    /// An object exposing its own conversion.
    Convertible(Arc<dyn TimestampSource>),
    /// An object carrying whole seconds since the Unix epoch, such as
    /// `{"seconds": 1700000000, "nanoseconds": 0}`.
    EpochSeconds {
        /// Whole seconds since the Unix epoch.
        seconds: i64,
        /// Sub-second part in nanoseconds.
        nanos: u32,
    },
    /// Anything else; conversion is attempted directly from the value.
    ///
    /// Strings are read as RFC 3339, then as timezone-less date-times (UTC),
    /// then as bare `YYYY-MM-DD` dates at midnight UTC, then as integer
    /// milliseconds. Numbers are milliseconds since the Unix epoch.
    Raw(Value),
}

impl RawTimestamp {
    /// Wraps a convertible timestamp object.
    #[must_use]
    pub fn convertible(source: impl TimestampSource + 'static) -> Self {
        Self::Convertible(Arc::new(source))
    }

    /// Classifies an arbitrary JSON value into one of the accepted shapes.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match epoch_seconds(&value) {
            Some((seconds, nanos)) => Self::EpochSeconds { seconds, nanos },
            None => Self::Raw(value),
        }
    }

    /// Converts to a canonical instant, or `None` when the value is not
    /// recognizable as one.
    #[must_use]
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Native(instant) => Some(*instant),
            Self::Convertible(source) => source.to_utc(),
            Self::EpochSeconds { seconds, nanos } => DateTime::from_timestamp(*seconds, *nanos),
            Self::Raw(value) => parse_raw(value),
        }
    }
}

impl From<DateTime<Utc>> for RawTimestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Native(value)
    }
}

/// Normalizes a required timestamp, substituting the clock's current time
/// when the value is absent or unrecognizable.
#[must_use]
pub fn normalize_required(raw: Option<&RawTimestamp>, clock: &impl Clock) -> DateTime<Utc> {
    normalize_optional(raw).unwrap_or_else(|| clock.utc())
}

/// Normalizes an optional timestamp.
///
/// Absent values stay absent. A present value that cannot be recognized is
/// also treated as absent.
#[must_use]
pub fn normalize_optional(raw: Option<&RawTimestamp>) -> Option<DateTime<Utc>> {
    let timestamp = raw?;
    let converted = timestamp.to_utc();
    if converted.is_none() {
        tracing::debug!(?timestamp, "unrecognized timestamp shape");
    }
    converted
}

fn epoch_seconds(value: &Value) -> Option<(i64, u32)> {
    let Value::Object(map) = value else {
        return None;
    };
    let seconds = map
        .get("seconds")
        .or_else(|| map.get("_seconds"))
        .and_then(Value::as_i64)?;
    let nanos = map
        .get("nanoseconds")
        .or_else(|| map.get("_nanoseconds"))
        .and_then(Value::as_u64)
        .and_then(|raw| u32::try_from(raw).ok())
        .unwrap_or(0);
    Some((seconds, nanos))
}

fn parse_raw(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => parse_text(text),
        Value::Number(number) => number.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    let naive = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok());
    if let Some(date_time) = naive {
        return Some(date_time.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
    }
    trimmed
        .parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}

impl Serialize for RawTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Native(instant) => {
                serializer.serialize_str(&instant.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Self::Convertible(source) => match source.to_utc() {
                Some(instant) => serializer
                    .serialize_str(&instant.to_rfc3339_opts(SecondsFormat::Millis, true)),
                None => serializer.serialize_none(),
            },
            Self::EpochSeconds { seconds, nanos } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("seconds", seconds)?;
                map.serialize_entry("nanoseconds", nanos)?;
                map.end()
            }
            Self::Raw(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for RawTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(value))
    }
}
