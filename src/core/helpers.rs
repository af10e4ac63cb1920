use regex::Regex;
use std::sync::OnceLock;

use crate::config::MIN_PASSWORD_LENGTH;
use crate::core::errors::{Field, FieldError};

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn email_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Regex should compile"))
}

fn password_charset_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[A-Za-z\d@$!%*#?&]+$").expect("Regex should compile"))
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

/// At least eight characters from the allowed set, with a letter and a digit.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
        && password_charset_regex().is_match(password)
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Checks every signup field and reports each one that fails.
pub fn validate_signup(name: &str, email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push(FieldError::new(Field::Name, "Please enter your name"));
    }
    if !is_valid_email(email) {
        errors.push(FieldError::new(Field::Email, "Please enter a valid email address"));
    }
    if !is_valid_password(password) {
        errors.push(FieldError::new(
            Field::Password,
            "Password must be at least 8 characters with letters and numbers",
        ));
    }
    errors
}

/// Trimmed content, or `None` when nothing but whitespace was given.
pub fn non_empty_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
