//! In-process tables with the same query semantics as the hosted backend.
//!
//! Backs the CLI's offline mode (`--fixture`) and the matching tests. The
//! fixture format mirrors the backend tables one-to-one:
//!
//! ```json
//! {
//!   "profiles":    [{ "id": "...", "display_name": "Ada", "bio": null, "points": 120, "swaps_completed": 3 }],
//!   "skills":      [{ "id": "...", "name": "Rust", "category": "Programming" }],
//!   "user_skills": [{ "id": "...", "user_id": "...", "skill_id": "...",
//!                     "skill_type": "offered", "proficiency_level": "advanced" }]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use skillswap_common::models::{Profile, Proficiency, Skill, SkillDirection, UserSkill};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::query::UserSkillQuery;
use crate::store::SkillStore;

/// A flat `user_skills` row, before joining.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSkillRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skill_id: Uuid,
    #[serde(rename = "skill_type")]
    pub direction: SkillDirection,
    #[serde(rename = "proficiency_level")]
    pub level: Proficiency,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub user_skills: Vec<UserSkillRecord>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: HashMap<Uuid, Profile>,
    skills: HashMap<Uuid, Skill>,
    user_skills: Vec<UserSkillRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixture(fixture: Fixture) -> Self {
        Self {
            profiles: fixture.profiles.into_iter().map(|p| (p.id, p)).collect(),
            skills: fixture.skills.into_iter().map(|s| (s.id, s)).collect(),
            user_skills: fixture.user_skills,
        }
    }

    /// Load a JSON fixture file.
    pub async fn load(path: &Path) -> StoreResult<Self> {
        let raw = tokio::fs::read(path).await?;
        let fixture: Fixture = serde_json::from_slice(&raw)?;
        tracing::info!(
            profiles = fixture.profiles.len(),
            skills = fixture.skills.len(),
            user_skills = fixture.user_skills.len(),
            "Loaded fixture from {}",
            path.display()
        );
        Ok(Self::from_fixture(fixture))
    }

    // ── Seeding ───────────────────────────────────────────────────────────────

    pub fn add_profile(&mut self, display_name: &str) -> Uuid {
        let id = Uuid::now_v7();
        self.profiles.insert(
            id,
            Profile {
                id,
                display_name: Some(display_name.to_owned()),
                bio: None,
                points: 0,
                swaps_completed: 0,
            },
        );
        id
    }

    pub fn add_skill(&mut self, name: &str, category: Option<&str>) -> Uuid {
        let id = Uuid::now_v7();
        self.skills.insert(
            id,
            Skill {
                id,
                name: name.to_owned(),
                category: category.map(str::to_owned),
            },
        );
        id
    }

    /// List `skill_id` on a user's profile.
    pub fn list_skill(
        &mut self,
        user_id: Uuid,
        skill_id: Uuid,
        direction: SkillDirection,
        level: Proficiency,
    ) -> Uuid {
        let id = Uuid::now_v7();
        self.user_skills.push(UserSkillRecord {
            id,
            user_id,
            skill_id,
            direction,
            level,
        });
        id
    }

    // ── Querying ──────────────────────────────────────────────────────────────

    /// Inner join on `skills`; left join on `profiles` when requested.
    fn join(&self, record: &UserSkillRecord, with_profile: bool) -> Option<UserSkill> {
        let skill = self.skills.get(&record.skill_id)?.clone();
        let profile = if with_profile {
            self.profiles.get(&record.user_id).cloned()
        } else {
            None
        };
        Some(UserSkill {
            id: record.id,
            user_id: record.user_id,
            skill_id: record.skill_id,
            direction: record.direction,
            level: record.level,
            skill,
            profile,
        })
    }

    fn select(&self, query: &UserSkillQuery) -> Vec<UserSkill> {
        let mut rows: Vec<UserSkill> = self
            .user_skills
            .iter()
            .filter_map(|r| self.join(r, query.includes_profile()))
            .filter(|row| query.matches(row))
            .collect();

        if let Some((col, ascending)) = query.ordering() {
            rows.sort_by(|a, b| {
                let ord = col.compare(a, b);
                if ascending { ord } else { ord.reverse() }
            });
        }
        if let Some(n) = query.row_limit() {
            rows.truncate(n);
        }
        rows
    }
}

#[async_trait]
impl SkillStore for MemoryStore {
    async fn user_skills(&self, query: &UserSkillQuery) -> StoreResult<Vec<UserSkill>> {
        Ok(self.select(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Column;

    fn seeded() -> (MemoryStore, Uuid, Uuid, Uuid) {
        let mut store = MemoryStore::new();
        let ada = store.add_profile("Ada");
        let bob = store.add_profile("Bob");
        let rust = store.add_skill("Rust", Some("Programming"));
        store.list_skill(ada, rust, SkillDirection::Offered, Proficiency::Intermediate);
        store.list_skill(bob, rust, SkillDirection::Offered, Proficiency::Advanced);
        store.list_skill(bob, rust, SkillDirection::Needed, Proficiency::Beginner);
        (store, ada, bob, rust)
    }

    #[tokio::test]
    async fn filters_and_joins_profiles() {
        let (store, ada, bob, rust) = seeded();
        let q = UserSkillQuery::new()
            .eq(Column::SkillId, rust)
            .eq(Column::SkillType, SkillDirection::Offered)
            .neq(Column::UserId, ada)
            .with_profile();

        let rows = store.user_skills(&q).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_id, bob);
        assert_eq!(rows[0].skill.name, "Rust");
        assert_eq!(rows[0].profile.as_ref().and_then(|p| p.display_name.as_deref()), Some("Bob"));
    }

    #[tokio::test]
    async fn profile_is_only_embedded_on_request() {
        let (store, ada, _, _) = seeded();
        let rows = store
            .user_skills(&UserSkillQuery::new().eq(Column::UserId, ada))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].profile.is_none());
    }

    #[tokio::test]
    async fn orders_by_rank_and_limits() {
        let (store, _, bob, _) = seeded();
        let rows = store
            .user_skills(
                &UserSkillQuery::new()
                    .order_by(Column::ProficiencyLevel, false)
                    .limit(2),
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].user_id, bob);
        assert_eq!(rows[0].level, Proficiency::Advanced);
        assert_eq!(rows[1].level, Proficiency::Intermediate);
    }

    #[tokio::test]
    async fn rows_with_unknown_skill_are_dropped() {
        let mut store = MemoryStore::new();
        let ada = store.add_profile("Ada");
        store.list_skill(ada, Uuid::nil(), SkillDirection::Needed, Proficiency::Beginner);
        assert!(store.user_skills(&UserSkillQuery::new()).await.unwrap().is_empty());
    }

    #[test]
    fn fixture_round_trips_backend_column_names() {
        let raw = r#"{
            "skills": [{"id": "00000000-0000-0000-0000-000000000001", "name": "Chess", "category": null}],
            "user_skills": [{
                "id": "00000000-0000-0000-0000-000000000002",
                "user_id": "00000000-0000-0000-0000-000000000003",
                "skill_id": "00000000-0000-0000-0000-000000000001",
                "skill_type": "needed",
                "proficiency_level": "beginner"
            }]
        }"#;
        let fixture: Fixture = serde_json::from_str(raw).unwrap();
        assert!(fixture.profiles.is_empty());
        let store = MemoryStore::from_fixture(fixture);
        assert_eq!(store.select(&UserSkillQuery::new()).len(), 1);
    }
}
