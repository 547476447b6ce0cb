//! Profile model — the public face of a user.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's public profile, as stored in the `profiles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Same ID as the auth user
    pub id: Uuid,

    pub display_name: Option<String>,

    /// Short bio / about me
    pub bio: Option<String>,

    /// Accumulated reward-points balance
    #[serde(default)]
    pub points: i64,

    /// Number of swaps this user has completed
    #[serde(default)]
    pub swaps_completed: i32,
}

impl Profile {
    /// Name to show in listings, falling back to a short form of the ID.
    pub fn label(&self) -> String {
        match self.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => format!("user-{}", &self.id.simple().to_string()[..8]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_falls_back_to_id_prefix() {
        let id = Uuid::parse_str("0191d2a4-0000-7000-8000-000000000000").unwrap();
        let profile = Profile {
            id,
            display_name: Some("  ".into()),
            bio: None,
            points: 0,
            swaps_completed: 0,
        };
        assert_eq!(profile.label(), "user-0191d2a4");
    }

    #[test]
    fn test_missing_counters_default_to_zero() {
        let profile: Profile = serde_json::from_str(
            r#"{"id":"0191d2a4-0000-7000-8000-000000000000","display_name":"Ada","bio":null}"#,
        )
        .unwrap();
        assert_eq!(profile.points, 0);
        assert_eq!(profile.swaps_completed, 0);
        assert_eq!(profile.label(), "Ada");
    }
}
