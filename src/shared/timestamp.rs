//! Timestamp normalization: venue-declared units → `DateTime<Utc>`.
//!
//! The unit is always supplied by the call site. Nothing here guesses a unit
//! from the magnitude of the value.

use crate::error::{NormalizeError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Format of Vircurex's UTC date-time strings.
pub const UTC_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Unit a venue encodes a numeric timestamp in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampUnit {
    /// Whole seconds since the epoch (`1391825343`).
    Seconds,
    /// Whole milliseconds since the epoch (`1385579841777`).
    Milliseconds,
    /// Seconds with a fractional part (`1385579841.7775`), truncated to milliseconds.
    FractionalSeconds,
}

/// A timestamp exactly as the venue's JSON carried it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawTimestamp {
    /// Decimal rendering of the raw value.
    ///
    /// `f64` `Display` prints the shortest text that round-trips, which for any
    /// JSON literal up to 17 significant digits is the literal itself.
    fn to_text(&self) -> String {
        match self {
            RawTimestamp::Integer(n) => n.to_string(),
            RawTimestamp::Float(f) => f.to_string(),
            RawTimestamp::Text(s) => s.clone(),
        }
    }
}

impl std::fmt::Display for RawTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl From<i64> for RawTimestamp {
    fn from(n: i64) -> Self {
        RawTimestamp::Integer(n)
    }
}

impl From<f64> for RawTimestamp {
    fn from(f: f64) -> Self {
        RawTimestamp::Float(f)
    }
}

impl From<&str> for RawTimestamp {
    fn from(s: &str) -> Self {
        RawTimestamp::Text(s.to_string())
    }
}

impl From<String> for RawTimestamp {
    fn from(s: String) -> Self {
        RawTimestamp::Text(s)
    }
}

/// Convert a raw venue timestamp in the declared `unit` to a UTC instant.
pub fn normalize_timestamp(raw: &RawTimestamp, unit: TimestampUnit) -> Result<DateTime<Utc>> {
    if let RawTimestamp::Float(f) = raw {
        if !f.is_finite() {
            return Err(NormalizeError::invalid_timestamp(raw.to_text(), "not a finite number"));
        }
    }

    let text = raw.to_text();
    if !is_plain_number(&text) {
        return Err(NormalizeError::invalid_timestamp(&text, "not numeric"));
    }
    let value = Decimal::from_str_exact(&text)
        .map_err(|e| NormalizeError::invalid_timestamp(&text, e.to_string()))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(NormalizeError::invalid_timestamp(&text, "negative"));
    }

    let millis = match unit {
        TimestampUnit::Seconds => whole(value, &text)?.checked_mul(1000),
        TimestampUnit::Milliseconds => Some(whole(value, &text)?),
        TimestampUnit::FractionalSeconds => value
            .checked_mul(Decimal::from(1000))
            .and_then(|ms| ms.trunc().to_i64()),
    }
    .ok_or_else(|| NormalizeError::invalid_timestamp(&text, "out of range"))?;

    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| NormalizeError::invalid_timestamp(&text, "out of range"))
}

/// Parse a `YYYY-MM-DDTHH:MM:SS` string that the venue documents as UTC.
pub fn parse_utc_datetime(text: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, UTC_DATETIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| NormalizeError::invalid_timestamp(text, e.to_string()))
}

fn whole(value: Decimal, text: &str) -> Result<i64> {
    if !value.fract().is_zero() {
        return Err(NormalizeError::invalid_timestamp(text, "unit requires a whole number"));
    }
    value
        .to_i64()
        .ok_or_else(|| NormalizeError::invalid_timestamp(text, "out of range"))
}

fn is_plain_number(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let mut parts = unsigned.splitn(2, '.');
    let int_ok = parts
        .next()
        .map(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false);
    let frac_ok = parts
        .next()
        .map(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(true);
    int_ok && frac_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(raw: impl Into<RawTimestamp>, unit: TimestampUnit) -> i64 {
        normalize_timestamp(&raw.into(), unit).unwrap().timestamp_millis()
    }

    #[test]
    fn test_seconds() {
        assert_eq!(millis(1391825343i64, TimestampUnit::Seconds), 1391825343000);
        assert_eq!(millis("1391825343", TimestampUnit::Seconds), 1391825343000);
        assert_eq!(millis(0i64, TimestampUnit::Seconds), 0);
    }

    #[test]
    fn test_milliseconds() {
        assert_eq!(
            millis(1385579841777i64, TimestampUnit::Milliseconds),
            1385579841777
        );
    }

    #[test]
    fn test_fractional_seconds_truncate_to_millis() {
        assert_eq!(
            millis(1385579841.7775f64, TimestampUnit::FractionalSeconds),
            1385579841777
        );
        assert_eq!(
            millis("1385579841.7775", TimestampUnit::FractionalSeconds),
            1385579841777
        );
        assert_eq!(
            millis(1386513052i64, TimestampUnit::FractionalSeconds),
            1386513052000
        );
    }

    #[test]
    fn test_whole_units_reject_fractions() {
        let err = normalize_timestamp(&RawTimestamp::Float(1391825343.5), TimestampUnit::Seconds)
            .unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidTimestamp { .. }));
    }

    #[test]
    fn test_rejects_negative_and_non_numeric() {
        for raw in [
            RawTimestamp::Integer(-1),
            RawTimestamp::Text("-5.5".into()),
            RawTimestamp::Text("yesterday".into()),
            RawTimestamp::Text(String::new()),
            RawTimestamp::Text("1e9".into()),
            RawTimestamp::Float(f64::NAN),
            RawTimestamp::Float(f64::INFINITY),
        ] {
            let result = normalize_timestamp(&raw, TimestampUnit::FractionalSeconds);
            assert!(
                matches!(result, Err(NormalizeError::InvalidTimestamp { .. })),
                "{raw:?} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        let result = normalize_timestamp(&RawTimestamp::Integer(i64::MAX), TimestampUnit::Seconds);
        assert!(matches!(result, Err(NormalizeError::InvalidTimestamp { .. })));
    }

    #[test]
    fn test_raw_timestamp_deserializes_any_json_shape() {
        let int: RawTimestamp = serde_json::from_str("1391825343").unwrap();
        assert_eq!(int, RawTimestamp::Integer(1391825343));
        let float: RawTimestamp = serde_json::from_str("1385579841.7775").unwrap();
        assert_eq!(float, RawTimestamp::Float(1385579841.7775));
        let text: RawTimestamp = serde_json::from_str("\"1385579841.7775\"").unwrap();
        assert_eq!(text, RawTimestamp::Text("1385579841.7775".into()));
    }

    #[test]
    fn test_parse_utc_datetime() {
        let ts = parse_utc_datetime("2014-02-09T12:30:05").unwrap();
        assert_eq!(ts.timestamp(), 1391949005);
        assert!(parse_utc_datetime("09/02/2014").is_err());
    }
}
