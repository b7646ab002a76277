//! Field-level validation helpers shared by every request DTO.
//!
//! Request DTOs derive [`validator::Validate`]; the custom checks the derive
//! cannot express live here, together with the conversion from
//! [`ValidationErrors`] into the flat field list returned to clients.

use std::borrow::Cow;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;

/// A single rejected field. `field` uses the JSON (camelCase) name, with
/// nested objects joined by `.` and list items by `[index]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

pub const NUL_MESSAGE: &str = "must not contain NUL characters";

/// Reject empty and whitespace-only strings, and anything [`no_nul`] rejects.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    no_nul(value)
}

/// Reject text containing NUL characters, which PostgreSQL cannot store.
pub fn no_nul(value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::new("nul").with_message(Cow::Borrowed(NUL_MESSAGE)));
    }
    Ok(())
}

/// Require a date strictly before today (UTC).
pub fn in_the_past(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date >= Utc::now().date_naive() {
        return Err(ValidationError::new("past").with_message(Cow::Borrowed("must be in the past")));
    }
    Ok(())
}

/// Flatten nested validator output into a sorted list of field errors.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::Validation(field_errors(&errors))
    }
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (name, kind) in errors.errors() {
        let path = join_path(prefix, &camel_case(&name.to_string()));
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    out.push(FieldError {
                        field: path.clone(),
                        message: describe(err),
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn describe(err: &ValidationError) -> String {
    match &err.message {
        Some(message) => message.to_string(),
        None => format!("is invalid ({})", err.code),
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

/// `country_of_assembly` -> `countryOfAssembly`.
fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper_next = false;
    for c in snake.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
