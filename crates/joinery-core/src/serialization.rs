//! Text encodings for serialized columns and epoch-stored dates.

pub mod xml;

use crate::{schema::app::Serialization, Result};

use jiff::{civil::DateTime, tz::TimeZone, Timestamp};

/// Encodes a structured value as column text.
///
/// JSON output omits object members whose value is `null`. XML output wraps
/// the value in an element named `root`.
pub fn encode(kind: Serialization, root: &str, value: &serde_json::Value) -> Result<String> {
    match kind {
        Serialization::Json => Ok(serde_json::to_string(&strip_nulls(value.clone()))?),
        Serialization::Xml => Ok(xml::write(root, value)),
    }
}

/// Decodes column text back into a structured value.
pub fn decode(kind: Serialization, text: &str) -> Result<serde_json::Value> {
    match kind {
        Serialization::Json => Ok(serde_json::from_str(text)?),
        Serialization::Xml => xml::read(text),
    }
}

fn strip_nulls(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => serde_json::Value::Object(
            map.into_iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, value)| (key, strip_nulls(value)))
                .collect(),
        ),
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.into_iter().map(strip_nulls).collect())
        }
        value => value,
    }
}

/// Seconds between the Unix epoch and `datetime`, read as UTC.
pub fn epoch_seconds(datetime: DateTime) -> Result<i64> {
    Ok(datetime.to_zoned(TimeZone::UTC)?.timestamp().as_second())
}

/// The UTC civil date-time `seconds` after the Unix epoch.
pub fn from_epoch_seconds(seconds: i64) -> Result<DateTime> {
    Ok(TimeZone::UTC.to_datetime(Timestamp::from_second(seconds)?))
}
