//! Input validation utilities.

use uuid::Uuid;
use validator::Validate;

use crate::error::SkillSwapError;

/// Validate a request body, returning a SkillSwapError::Validation on failure.
pub fn validate_request<T: Validate>(body: &T) -> Result<(), SkillSwapError> {
    body.validate().map_err(|e| SkillSwapError::Validation {
        message: format_validation_errors(e),
    })
}

/// Format validation errors into a human-readable string.
fn format_validation_errors(errors: validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{field}'"))
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// Parse a user identifier supplied at the edge (CLI argument, query string).
pub fn parse_user_id(raw: &str) -> Result<Uuid, SkillSwapError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| SkillSwapError::validation(format!("'{raw}' is not a valid user id")))
}
