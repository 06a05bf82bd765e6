use chrono::{DateTime, TimeZone as _, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{domain::logic::utils::sanitize_amount, entities::ItemId};

/// Number read from untrusted storage. Numeric strings are accepted; every
/// other shape (and negatives, NaN) becomes 0.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct LenientAmountModel(pub f64);

impl<'de> Deserialize<'de> for LenientAmountModel {
    fn deserialize<D>(deserializer: D) -> Result<LenientAmountModel, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        };
        Ok(LenientAmountModel(sanitize_amount(amount)))
    }
}

impl From<LenientAmountModel> for f64 {
    fn from(m: LenientAmountModel) -> f64 {
        m.0
    }
}

/// Text read from untrusted storage. Numbers are stringified, other shapes
/// are treated as absent.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct LenientStringModel(pub Option<String>);

impl<'de> Deserialize<'de> for LenientStringModel {
    fn deserialize<D>(deserializer: D) -> Result<LenientStringModel, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(LenientStringModel(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }))
    }
}

impl LenientStringModel {
    /// Stored identifier, or a fresh one when absent or blank.
    pub(crate) fn into_id(self) -> ItemId {
        match self.0 {
            Some(id) if !id.trim().is_empty() => ItemId(id),
            _ => ItemId::generate(),
        }
    }
}

/// Timestamp serialized either as an RFC 3339 string (the usual JSON form of a
/// date) or as epoch milliseconds. Unparseable values are absent.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct TimestampModel(pub Option<DateTime<Utc>>);

impl<'de> Deserialize<'de> for TimestampModel {
    fn deserialize<D>(deserializer: D) -> Result<TimestampModel, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(TimestampModel(match Value::deserialize(deserializer)? {
            Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|d| d.with_timezone(&Utc)),
            Value::Number(n) => n
                .as_i64()
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
            _ => None,
        }))
    }
}
