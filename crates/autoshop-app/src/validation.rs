// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::Date;
use time::macros::format_description;

pub const DATE_LAYOUT: &str = "YYYY-MM-DD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    TooShort { min: usize },
    Required,
    InvalidEmail,
    InvalidYear,
    InvalidDate,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooShort { min } => write!(f, "must be at least {min} characters"),
            Self::Required => f.write_str("value is required"),
            Self::InvalidEmail => f.write_str("invalid email address"),
            Self::InvalidYear => f.write_str("invalid 4-digit year"),
            Self::InvalidDate => f.write_str("invalid date value"),
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Length is counted in characters, not bytes, and the input is not trimmed.
pub fn require_min_chars(input: &str, min: usize) -> ValidationResult<()> {
    if input.chars().count() < min {
        return Err(ValidationError::TooShort { min });
    }
    Ok(())
}

pub fn require_non_empty(input: &str) -> ValidationResult<()> {
    if input.is_empty() {
        return Err(ValidationError::Required);
    }
    Ok(())
}

pub fn require_year(input: &str) -> ValidationResult<()> {
    if input.len() == 4 && input.bytes().all(|byte| byte.is_ascii_digit()) {
        return Ok(());
    }
    Err(ValidationError::InvalidYear)
}

pub fn require_email(input: &str) -> ValidationResult<()> {
    if is_email_shape(input) {
        return Ok(());
    }
    Err(ValidationError::InvalidEmail)
}

pub fn parse_optional_date(input: &str) -> ValidationResult<Option<Date>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_date(trimmed).map(Some)
}

fn parse_date(input: &str) -> ValidationResult<Date> {
    if input.len() != DATE_LAYOUT.len() {
        return Err(ValidationError::InvalidDate);
    }
    Date::parse(input, &format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate)
}

fn is_email_shape(input: &str) -> bool {
    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }
    is_email_local_part(local) && is_email_domain(domain)
}

fn is_email_local_part(local: &str) -> bool {
    if local.is_empty() || local.starts_with('.') || local.ends_with('.') {
        return false;
    }
    if local.contains("..") {
        return false;
    }
    local
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '\'' | '+' | '-' | '.'))
}

fn is_email_domain(domain: &str) -> bool {
    let labels = domain.split('.').collect::<Vec<_>>();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        let mut chars = label.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphanumeric() => {
                chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
            }
            _ => false,
        }
    });
    if !labels_ok {
        return false;
    }

    labels.last().is_some_and(|tld| {
        tld.len() >= 2 && tld.chars().all(|ch| ch.is_ascii_alphabetic())
    })
}
