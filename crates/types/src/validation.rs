//! Input validation for service boundary fields.
//!
//! Provides configurable validation for raffle names and participant emails.
//! Applied by the service layer before any store operation; repositories
//! assume their inputs already passed.
//!
//! Email checking here is deliberately shallow: non-empty local and domain
//! parts around a single `@`, no whitespace, length cap. Deliverability is a
//! collaborator concern.

use std::fmt;

use crate::config::ValidationConfig;

/// Validation error with structured context.
///
/// Contains the specific constraint that was violated and the field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Description of the violated constraint.
    pub constraint: String,
}

impl ValidationError {
    fn new(field: &str, constraint: impl Into<String>) -> Self {
        Self { field: field.to_string(), constraint: constraint.into() }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.constraint)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a raffle name against configured limits.
///
/// Names must be non-empty after trimming and not exceed
/// `config.max_name_bytes` in UTF-8 byte length.
///
/// # Errors
///
/// Returns [`ValidationError`] if the name is blank or too long.
pub fn validate_raffle_name(name: &str, config: &ValidationConfig) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("name", "must not be blank"));
    }
    if name.len() > config.max_name_bytes {
        return Err(ValidationError::new(
            "name",
            format!(
                "length {} bytes exceeds maximum {} bytes",
                name.len(),
                config.max_name_bytes
            ),
        ));
    }
    Ok(())
}

/// Validates a raffle description against configured limits.
///
/// Descriptions may be empty but must not exceed
/// `config.max_description_bytes` in UTF-8 byte length.
///
/// # Errors
///
/// Returns [`ValidationError`] if the description is too long.
pub fn validate_description(
    description: &str,
    config: &ValidationConfig,
) -> Result<(), ValidationError> {
    if description.len() > config.max_description_bytes {
        return Err(ValidationError::new(
            "description",
            format!(
                "length {} bytes exceeds maximum {} bytes",
                description.len(),
                config.max_description_bytes
            ),
        ));
    }
    Ok(())
}

/// Validates a participant email.
///
/// Emails must:
/// - Be non-empty
/// - Not exceed `config.max_email_bytes` in UTF-8 byte length
/// - Contain exactly one `@` with non-empty text on both sides
/// - Contain no whitespace
///
/// # Errors
///
/// Returns [`ValidationError`] describing the first violated constraint.
pub fn validate_email(email: &str, config: &ValidationConfig) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new("email", "must not be empty"));
    }
    if email.len() > config.max_email_bytes {
        return Err(ValidationError::new(
            "email",
            format!(
                "length {} bytes exceeds maximum {} bytes",
                email.len(),
                config.max_email_bytes
            ),
        ));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::new("email", "must not contain whitespace"));
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::new(
            "email",
            "must contain exactly one '@' with text on both sides",
        )),
    }
}
