/// Custom deserializers - handle provider inconsistencies
///
/// Providers return numbers as JSON numbers, numeric strings or null depending
/// on the endpoint and token. Anything unparseable becomes `None` instead of
/// failing the whole response.
use chrono::DateTime;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Number or numeric string -> f64
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_f64))
}

/// Number, numeric string or RFC 3339 timestamp -> i64
///
/// Timestamps become epoch seconds; plain numbers are kept as given.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_timestamp))
}

/// String -> trimmed non-empty string; null, other JSON types and blanks -> None
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_string))
}

pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

pub fn value_to_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|dt| dt.timestamp()))
        }
        _ => None,
    }
}
