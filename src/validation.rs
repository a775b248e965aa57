//! Form sanitizing and field-level validation errors.
//!
//! Declarative rules live on the form input types (`#[derive(Validate)]`);
//! this module turns `validator` output into the ordered list of
//! `{field, message}` pairs shown next to a re-rendered form.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use uuid::Uuid;
use validator::ValidationErrors;

/// One failed rule on one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered collection of field errors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect `validator` errors, ordered by the form's field order.
    pub fn from_validation(result: Result<(), ValidationErrors>, field_order: &[&str]) -> Self {
        let mut errors = Self::new();
        let Err(validation) = result else {
            return errors;
        };

        let mut fields: Vec<_> = validation.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| {
            let field: &str = field.as_ref();
            field_order
                .iter()
                .position(|f| *f == field)
                .unwrap_or(field_order.len())
        });

        for (field, failures) in fields {
            for failure in failures.iter() {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                errors.push(field.to_string(), message);
            }
        }
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn list(&self) -> &[FieldError] {
        &self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

/// Escape HTML-significant characters, the way form inputs are stored.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Trim then escape
pub fn clean(value: &str) -> String {
    escape(value.trim())
}

/// Parse a record identifier coming from a form or a path segment
pub fn parse_id(value: &str) -> Option<Uuid> {
    Uuid::parse_str(value.trim()).ok()
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

const LOCAL_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse an ISO-8601 calendar date (`2026-10-19`, `20261019`) or date-time
/// with or without offset (`2026-10-19T10:00:00Z`, `2026-10-19T10:00`).
/// Only the date part of a date-time is kept.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            LOCAL_DATE_TIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|dt| dt.date())
        })
}
