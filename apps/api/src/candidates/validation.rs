use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::candidates::models::{format_timestamp, Candidate};
use crate::candidates::schema::{Field, FieldKind, CANDIDATE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Field absent, `null`, or an empty string.
    Required,
    /// Field present but not convertible to the declared type.
    Cast,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    fn required(path: &str) -> Self {
        FieldError {
            path: path.to_string(),
            kind: ErrorKind::Required,
            message: format!("Path `{path}` is required."),
        }
    }

    fn cast(path: &str, kind: &FieldKind, value: &Value) -> Self {
        FieldError {
            path: path.to_string(),
            kind: ErrorKind::Cast,
            message: format!(
                "Cast to {} failed for value {value} at path `{path}`",
                kind.type_name()
            ),
        }
    }
}

/// Every field that failed validation, in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Candidate validation failed")?;
        for (i, err) in self.errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { ", " };
            if err.path.is_empty() {
                write!(f, "{sep}{}", err.message)?;
            } else {
                write!(f, "{sep}{}: {}", err.path, err.message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Casts and checks a raw JSON document against the Candidate schema.
///
/// All failing fields are collected before returning. Fields not named by the
/// schema are dropped.
pub fn validate_candidate(input: &Value) -> Result<Candidate, ValidationErrors> {
    let mut errors = Vec::new();

    let normalized = match input {
        Value::Object(fields) => cast_object(fields, CANDIDATE, "", &mut errors),
        other => {
            errors.push(FieldError {
                path: String::new(),
                kind: ErrorKind::Cast,
                message: format!("Candidate document must be a JSON object, got {other}"),
            });
            Map::new()
        }
    };

    if !errors.is_empty() {
        return Err(ValidationErrors { errors });
    }

    serde_json::from_value(Value::Object(normalized)).map_err(|e| ValidationErrors {
        errors: vec![FieldError {
            path: String::new(),
            kind: ErrorKind::Cast,
            message: e.to_string(),
        }],
    })
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

fn cast_object(
    input: &Map<String, Value>,
    fields: &[Field],
    prefix: &str,
    errors: &mut Vec<FieldError>,
) -> Map<String, Value> {
    let mut out = Map::new();
    for field in fields {
        let path = join_path(prefix, field.name);
        if let Some(value) = cast_value(input.get(field.name), &field.kind, &path, errors) {
            out.insert(field.name.to_string(), value);
        }
    }
    out
}

fn cast_value(
    value: Option<&Value>,
    kind: &FieldKind,
    path: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Value> {
    let value = match value {
        None | Some(Value::Null) => {
            match kind {
                // Lists default to empty.
                FieldKind::List(_) => return Some(Value::Array(Vec::new())),
                // A missing sub-document reports each of its own required fields.
                FieldKind::Object(fields) => {
                    cast_object(&Map::new(), fields, path, errors);
                }
                _ => errors.push(FieldError::required(path)),
            }
            return None;
        }
        Some(value) => value,
    };

    if matches!(value, Value::String(s) if s.is_empty()) {
        errors.push(FieldError::required(path));
        return None;
    }

    let cast = match kind {
        FieldKind::Text => cast_text(value),
        FieldKind::Number => cast_number(value),
        FieldKind::Year => cast_year(value),
        FieldKind::Date => cast_date(value),
        FieldKind::Object(fields) => match value {
            Value::Object(inner) => {
                Some(Value::Object(cast_object(inner, fields, path, errors)))
            }
            _ => None,
        },
        FieldKind::List(fields) => match value {
            Value::Array(items) => {
                Some(Value::Array(cast_list(items, *fields, path, errors)))
            }
            _ => None,
        },
    };

    if cast.is_none() {
        errors.push(FieldError::cast(path, kind, value));
    }
    cast
}

fn cast_list(
    items: &[Value],
    fields: &'static [Field],
    path: &str,
    errors: &mut Vec<FieldError>,
) -> Vec<Value> {
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let item_path = join_path(path, &i.to_string());
        match item {
            Value::Object(inner) => {
                out.push(Value::Object(cast_object(inner, fields, &item_path, errors)));
            }
            other => {
                errors.push(FieldError::cast(&item_path, &FieldKind::Object(fields), other));
            }
        }
    }
    out
}

fn cast_text(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => Some(Value::String(s.clone())),
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        _ => None,
    }
}

fn cast_number(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => Some(Value::Number(n.clone())),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        _ => None,
    }
}

fn cast_year(value: &Value) -> Option<Value> {
    let year = match value {
        Value::Number(n) => match n.as_i64() {
            Some(whole) => whole,
            None => n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)?,
        },
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    i32::try_from(year).ok().map(Value::from)
}

fn cast_date(value: &Value) -> Option<Value> {
    let ts = match value {
        Value::String(s) => parse_date(s.trim())?,
        Value::Number(n) => {
            let millis = match n.as_i64() {
                Some(whole) => whole,
                None => n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)?,
            };
            Utc.timestamp_millis_opt(millis).single()?
        }
        _ => return None,
    };
    Some(Value::String(format_timestamp(&ts)))
}

/// Date-times without an offset, read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Accepts a plain calendar date (`YYYY-MM-DD`, midnight UTC), an RFC 3339
/// timestamp, or an ISO date-time without an offset (taken as UTC).
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.and_utc())
}
