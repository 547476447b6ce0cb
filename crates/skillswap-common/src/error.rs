//! Centralized error types for SkillSwap.
//!
//! Uses `thiserror` for the error definitions. Each variant carries a stable
//! machine-readable code so front-ends can branch without matching on messages.

/// Core application error type used across all SkillSwap crates.
#[derive(Debug, thiserror::Error)]
pub enum SkillSwapError {
    // === Input errors ===
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // === Lifecycle errors ===
    #[error("Swap cannot move from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    // === Infrastructure errors ===
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl SkillSwapError {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Error code string for programmatic handling by callers.
    pub fn error_code(&self) -> &str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Convenience type alias for Results using SkillSwapError.
pub type SkillSwapResult<T> = Result<T, SkillSwapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(SkillSwapError::validation("bad").error_code(), "VALIDATION_ERROR");
        let err = SkillSwapError::InvalidTransition {
            from: "completed".into(),
            to: "pending".into(),
        };
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert_eq!(err.to_string(), "Swap cannot move from completed to pending");
    }
}
