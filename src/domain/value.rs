use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Loosely typed scalar accepted at the operation boundary.
///
/// Entry fields arrive from form input or JSON bodies as either numbers or
/// strings; coercion into the stored types happens here, before anything is
/// written. A value that cannot be coerced rejects the whole operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Coerces to a finite number. Strings are trimmed and parsed.
    pub fn to_number(&self) -> Result<f64, CoerceError> {
        let value = match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| CoerceError::NotNumeric(self.to_string()))?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CoerceError::NotNumeric(self.to_string()))
        }
    }

    /// Coerces to a whole number within `i64` range.
    pub fn to_integer(&self) -> Result<i64, CoerceError> {
        let value = self.to_number()?;
        if value.fract() != 0.0 {
            return Err(CoerceError::NotIntegral(self.to_string()));
        }
        if value < i64::MIN as f64 || value > i64::MAX as f64 {
            return Err(CoerceError::NotIntegral(self.to_string()));
        }
        Ok(value as i64)
    }

    /// Coerces to a UTC timestamp.
    ///
    /// Accepts RFC 3339 strings, plain `YYYY-MM-DD` dates (read as midnight
    /// UTC), and numbers as Unix epoch milliseconds.
    pub fn to_timestamp(&self) -> Result<DateTime<Utc>, CoerceError> {
        match self {
            FieldValue::Number(n) => {
                if !n.is_finite() {
                    return Err(CoerceError::NotTimestamp(self.to_string()));
                }
                Utc.timestamp_millis_opt(*n as i64)
                    .single()
                    .ok_or_else(|| CoerceError::NotTimestamp(self.to_string()))
            }
            FieldValue::Text(s) => {
                let raw = s.trim();
                if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
                    return Ok(parsed.with_timezone(&Utc));
                }
                if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                    let midnight = date
                        .and_hms_opt(0, 0, 0)
                        .ok_or_else(|| CoerceError::NotTimestamp(self.to_string()))?;
                    return Ok(Utc.from_utc_datetime(&midnight));
                }
                Err(CoerceError::NotTimestamp(self.to_string()))
            }
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Text(value.to_rfc3339())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors raised when a [`FieldValue`] cannot be coerced to its target type.
pub enum CoerceError {
    NotNumeric(String),
    NotIntegral(String),
    NotTimestamp(String),
}

impl fmt::Display for CoerceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoerceError::NotNumeric(raw) => write!(f, "`{}` is not a number", raw),
            CoerceError::NotIntegral(raw) => write!(f, "`{}` is not a whole number", raw),
            CoerceError::NotTimestamp(raw) => write!(f, "`{}` is not a recognizable date", raw),
        }
    }
}

impl std::error::Error for CoerceError {}
