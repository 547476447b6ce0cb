//! Skill models — what users can teach and what they want to learn.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SkillSwapError;
use crate::models::profile::Profile;

/// A row of the `skills` catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
}

/// Whether a user lists a skill as something they teach or something they want.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillDirection {
    Offered,
    Needed,
}

impl SkillDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Offered => "offered",
            Self::Needed => "needed",
        }
    }

    /// The direction a counterparty must list the same skill under to complement this one.
    pub fn opposite(self) -> Self {
        match self {
            Self::Offered => Self::Needed,
            Self::Needed => Self::Offered,
        }
    }
}

impl fmt::Display for SkillDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillDirection {
    type Err = SkillSwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offered" => Ok(Self::Offered),
            "needed" => Ok(Self::Needed),
            other => Err(SkillSwapError::validation(format!(
                "unknown skill direction '{other}'"
            ))),
        }
    }
}

/// Self-assessed proficiency, ordered from least to most advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
}

impl Proficiency {
    pub const ALL: [Proficiency; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// 1-based rank used by the compatibility scorer.
    pub fn ordinal(self) -> i8 {
        match self {
            Self::Beginner => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Proficiency {
    type Err = SkillSwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(SkillSwapError::validation(format!(
                "unknown proficiency level '{other}'"
            ))),
        }
    }
}

/// A user's listing of one skill, joined with the skill row and optionally the owner's profile.
///
/// Field names follow the `user_skills` table; the embedded resources use the
/// backend's table names (`skills`, `profiles`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSkill {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skill_id: Uuid,

    #[serde(rename = "skill_type")]
    pub direction: SkillDirection,

    #[serde(rename = "proficiency_level")]
    pub level: Proficiency,

    #[serde(rename = "skills")]
    pub skill: Skill,

    #[serde(rename = "profiles", default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proficiency_ordinals() {
        let ordinals: Vec<i8> = Proficiency::ALL.iter().map(|p| p.ordinal()).collect();
        assert_eq!(ordinals, vec![1, 2, 3]);
        assert!(Proficiency::Advanced > Proficiency::Beginner);
    }

    #[test]
    fn test_proficiency_parse_is_case_insensitive() {
        assert_eq!("Advanced".parse::<Proficiency>().unwrap(), Proficiency::Advanced);
        assert_eq!(" beginner ".parse::<Proficiency>().unwrap(), Proficiency::Beginner);
        assert!("expert".parse::<Proficiency>().is_err());
    }

    #[test]
    fn test_direction_opposite() {
        assert_eq!(SkillDirection::Offered.opposite(), SkillDirection::Needed);
        assert_eq!("NEEDED".parse::<SkillDirection>().unwrap(), SkillDirection::Needed);
    }

    #[test]
    fn test_user_skill_decodes_backend_row() {
        let row: UserSkill = serde_json::from_str(
            r#"{
                "id": "0191d2a4-0000-7000-8000-000000000001",
                "user_id": "0191d2a4-0000-7000-8000-000000000002",
                "skill_id": "0191d2a4-0000-7000-8000-000000000003",
                "skill_type": "offered",
                "proficiency_level": "intermediate",
                "skills": {"id": "0191d2a4-0000-7000-8000-000000000003", "name": "Rust", "category": "Programming"}
            }"#,
        )
        .unwrap();
        assert_eq!(row.direction, SkillDirection::Offered);
        assert_eq!(row.level, Proficiency::Intermediate);
        assert_eq!(row.skill.name, "Rust");
        assert!(row.profile.is_none());
    }
}
