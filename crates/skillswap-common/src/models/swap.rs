//! Swap model — a negotiated exchange between two users over one skill.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{SkillSwapError, SkillSwapResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Swap {
    pub id: Uuid,

    /// The user who proposed the swap
    pub requester_id: Uuid,

    /// The user asked to teach
    pub provider_id: Uuid,

    pub skill_id: Uuid,
    pub status: SwapStatus,

    /// 1-5 rating left after completion
    pub rating: Option<i16>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Swap lifecycle: `pending → accepted → in_progress → completed`,
/// with `cancelled` reachable from any state that is not yet final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapStatus {
    Pending,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
}

impl SwapStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_final(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether the backend would accept moving a swap from `self` to `next`.
    pub fn can_transition_to(self, next: SwapStatus) -> bool {
        use SwapStatus::*;
        match (self, next) {
            (Pending, Accepted) | (Accepted, InProgress) | (InProgress, Completed) => true,
            (from, Cancelled) => !from.is_final(),
            _ => false,
        }
    }

    /// Like [`can_transition_to`](Self::can_transition_to), as a `Result` for `?` chains.
    pub fn check_transition(self, next: SwapStatus) -> SkillSwapResult<()> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(SkillSwapError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwapStatus {
    type Err = SkillSwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(SkillSwapError::validation(format!(
                "unknown swap status '{other}'"
            ))),
        }
    }
}

/// Rate a completed swap.
#[derive(Debug, Deserialize, Validate)]
pub struct RateSwapRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,
}

#[cfg(test)]
mod tests {
    use super::SwapStatus::*;
    use super::*;
    use crate::validation::validate_request;

    #[test]
    fn test_forward_lifecycle() {
        assert!(Pending.can_transition_to(Accepted));
        assert!(Accepted.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Completed));
    }

    #[test]
    fn test_no_skipping_or_going_back() {
        assert!(!Pending.can_transition_to(InProgress));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!InProgress.can_transition_to(Accepted));
        assert!(!Completed.can_transition_to(Pending));
    }

    #[test]
    fn test_cancel_only_before_final() {
        assert!(Pending.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Cancelled));
        assert!(Completed.check_transition(Cancelled).is_err());
    }

    #[test]
    fn test_status_parses_hyphenated() {
        assert_eq!("in-progress".parse::<SwapStatus>().unwrap(), InProgress);
    }

    #[test]
    fn test_rating_range() {
        assert!(validate_request(&RateSwapRequest { rating: 5 }).is_ok());
        assert!(validate_request(&RateSwapRequest { rating: 0 }).is_err());
        assert!(validate_request(&RateSwapRequest { rating: 6 }).is_err());
    }
}
