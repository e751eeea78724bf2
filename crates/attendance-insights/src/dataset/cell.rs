use super::duration::{AttendanceDuration, DurationParseError};
use chrono::NaiveDateTime;
use serde_json::Value;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A single spreadsheet cell after loading.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Duration(AttendanceDuration),
    Timestamp(NaiveDateTime),
}

impl CellValue {
    /// Builds a cell from delimited text, inferring numbers and booleans.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }

        match trimmed {
            "true" | "True" | "TRUE" => return Self::Bool(true),
            "false" | "False" | "FALSE" => return Self::Bool(false),
            _ => {}
        }

        match trimmed.parse::<f64>() {
            Ok(number) if number.is_nan() => Self::Empty,
            Ok(number) if number.is_finite() => Self::Number(number),
            _ => Self::Text(trimmed.to_string()),
        }
    }

    /// Builds a text cell, treating blank strings as missing.
    pub fn text(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self::Empty
        } else {
            Self::Text(raw.to_string())
        }
    }

    pub fn number(value: f64) -> Self {
        if value.is_nan() {
            Self::Empty
        } else {
            Self::Number(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// String form used for identifiers and codes; `None` for missing cells.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(value) => Some(value.clone()),
            Self::Number(value) => Some(format_number(*value)),
            Self::Bool(value) => Some(value.to_string()),
            Self::Duration(value) => Some(value.to_string()),
            Self::Timestamp(value) => Some(value.format(TIMESTAMP_FORMAT).to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(value) => value.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Bool(value) => *value,
            Self::Number(value) => *value != 0.0,
            Self::Text(value) => !matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "" | "no" | "n" | "false" | "0"
            ),
            Self::Duration(value) => !value.is_zero(),
            Self::Timestamp(_) => true,
        }
    }

    pub fn to_duration(&self) -> Result<AttendanceDuration, DurationParseError> {
        match self {
            Self::Duration(value) => Ok(*value),
            Self::Number(value) => AttendanceDuration::from_day_fraction(*value),
            Self::Text(value) => AttendanceDuration::parse(value),
            Self::Empty => Err(DurationParseError::Empty),
            Self::Bool(value) => Err(DurationParseError::Invalid(value.to_string())),
            Self::Timestamp(value) => Err(DurationParseError::Invalid(
                value.format(TIMESTAMP_FORMAT).to_string(),
            )),
        }
    }

    /// JSON rendering: durations as `HH:MM:SS`, missing values as null.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Empty => Value::Null,
            Self::Text(value) => Value::String(value.clone()),
            Self::Number(value) => json_number(*value),
            Self::Bool(value) => Value::Bool(*value),
            Self::Duration(value) => Value::String(value.to_string()),
            Self::Timestamp(value) => Value::String(value.format(TIMESTAMP_FORMAT).to_string()),
        }
    }
}

/// Whole numbers become JSON integers; non-finite values become null.
pub fn json_number(value: f64) -> Value {
    if !value.is_finite() {
        return Value::Null;
    }
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        return Value::from(value as i64);
    }
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}
