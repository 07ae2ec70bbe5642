//! Input checks shared by the services. All of them run before any store
//! access.

use thiserror::Error;

pub const MAX_REASON_LEN: usize = 500;
pub const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

pub fn validate_door_count(doors: i32) -> Result<i32, ValidationError> {
    if doors < 1 {
        return Err(ValidationError::new(format!(
            "Invalid door count: {doors}. Must be at least 1"
        )));
    }
    Ok(doors)
}

pub fn validate_reason(reason: &str) -> Result<&str, ValidationError> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("Reason is required"));
    }
    if trimmed.chars().count() > MAX_REASON_LEN {
        return Err(ValidationError::new(format!(
            "Reason must be {MAX_REASON_LEN} characters or less"
        )));
    }
    Ok(trimmed)
}

pub fn validate_email(email: &str) -> Result<&str, ValidationError> {
    let trimmed = email.trim();
    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err(ValidationError::new(format!("Invalid email: {trimmed}")));
    };

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return Err(ValidationError::new(format!("Invalid email: {trimmed}")));
    }

    if trimmed.chars().any(char::is_whitespace) {
        return Err(ValidationError::new("Email cannot contain whitespace"));
    }

    Ok(trimmed)
}

/// Optional person names may be absent, but not blank or oversized.
pub fn validate_optional_name<'a>(
    field: &str,
    name: Option<&'a str>,
) -> Result<Option<&'a str>, ValidationError> {
    match name.map(str::trim) {
        None => Ok(None),
        Some("") => Err(ValidationError::new(format!("{field} cannot be blank"))),
        Some(n) if n.chars().count() > MAX_NAME_LEN => Err(ValidationError::new(format!(
            "{field} must be {MAX_NAME_LEN} characters or less"
        ))),
        Some(n) => Ok(Some(n)),
    }
}

pub fn validate_organization_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("Organization name cannot be empty"));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::new(format!(
            "Organization name must be {MAX_NAME_LEN} characters or less"
        )));
    }
    Ok(trimmed)
}

pub fn validate_prize_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("Prize name cannot be empty"));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::new(format!(
            "Prize name must be {MAX_NAME_LEN} characters or less"
        )));
    }
    Ok(trimmed)
}
