//! Field rules shared by the actor and movie request bodies.

use chrono::{Datelike, Local, NaiveDate};
use thiserror::Error;

/// Date layouts accepted for `birthDay`.
const DATE_FORMATS: [&str; 4] = ["%m-%d-%Y", "%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Reasons a request body is rejected before it reaches a repository.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The {0} field is required")]
    MissingField(&'static str),

    #[error("Birth date not valid: {0}")]
    InvalidDate(String),

    #[error("Year not valid: {0}")]
    InvalidYear(String),
}

/// The current local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Trims `value`, rejecting it when absent or blank.
pub fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Accepts a birth date that parses and is not after `today`.
pub fn validate_birth_day(value: &str, today: NaiveDate) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    let date = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| ValidationError::InvalidDate(value.to_string()))?;

    if date > today {
        return Err(ValidationError::InvalidDate(value.to_string()));
    }
    Ok(())
}

/// Accepts a year that parses as an integer strictly before the year of `today`.
pub fn validate_year(value: &str, today: NaiveDate) -> Result<(), ValidationError> {
    match value.trim().parse::<i32>() {
        Ok(year) if year < today.year() => Ok(()),
        _ => Err(ValidationError::InvalidYear(value.to_string())),
    }
}
