//! Input validation for user supplied values.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::server::error::AppError;

pub const MINIMUM_PASSWORD_LENGTH: usize = 6;

/// Trims and lower-cases an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Checks the shape of an email address: one `@`, a non-empty local part and a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Normalizes an email address and rejects malformed ones.
pub fn validate_email(email: &str) -> Result<String, AppError> {
    let email = normalize_email(email);
    if !is_valid_email(&email) {
        return Err(AppError::BadRequest(format!("Invalid email address: {}", email)));
    }
    Ok(email)
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MINIMUM_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters",
            MINIMUM_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Trims a required name and rejects empty values.
pub fn validate_name(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

/// Age in whole years on the date of `at`.
pub fn age_at(birth_date: NaiveDate, at: DateTime<Utc>) -> i32 {
    let on = at.date_naive();
    let mut age = on.year() - birth_date.year();
    if (on.month(), on.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}
