//! Field validation for form submissions.

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::FormError;
use crate::core::models::{NewsletterSignup, ReminderRequest};

const MAX_NAME_LEN: usize = 200;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static regex compile"));

pub fn validate_email(email: &str) -> Result<(), FormError> {
    if email.len() > 320 || !EMAIL_RE.is_match(email) {
        return Err(FormError::Validation(format!(
            "'{}' is not a valid email address",
            email
        )));
    }
    Ok(())
}

pub fn validate_name(name: Option<&str>) -> Result<(), FormError> {
    let Some(name) = name else {
        return Ok(());
    };
    if name.len() > MAX_NAME_LEN {
        return Err(FormError::Validation(format!(
            "name must be at most {} characters",
            MAX_NAME_LEN
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(FormError::Validation(
            "name must not contain control characters".to_string(),
        ));
    }
    Ok(())
}

/// Parse and validate a reminder date. Accepts `YYYY-MM-DD` and requires a
/// date strictly after today.
pub fn validate_remind_at(remind_at: &str) -> Result<NaiveDate, FormError> {
    let date = NaiveDate::parse_from_str(remind_at, "%Y-%m-%d").map_err(|_| {
        FormError::Validation(format!(
            "'{}' is not a valid date, expected YYYY-MM-DD",
            remind_at
        ))
    })?;
    if date <= Utc::now().date_naive() {
        return Err(FormError::Validation(
            "remind_at must be a future date".to_string(),
        ));
    }
    Ok(date)
}

pub fn validate_signup(signup: &NewsletterSignup) -> Result<(), FormError> {
    validate_email(&signup.email)?;
    validate_name(signup.name.as_deref())
}

pub fn validate_reminder(reminder: &ReminderRequest) -> Result<NaiveDate, FormError> {
    validate_email(&reminder.email)?;
    validate_name(reminder.name.as_deref())?;
    validate_remind_at(&reminder.remind_at)
}
