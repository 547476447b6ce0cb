//! The port the match finder reads through.

use async_trait::async_trait;
use skillswap_common::models::UserSkill;

use crate::error::StoreResult;
use crate::query::UserSkillQuery;

/// Read access to the `user_skills` table, joined with `skills` (always) and
/// `profiles` (when the query asks for it).
///
/// Implementations return rows in the order the query requests and never
/// more than its limit.
#[async_trait]
pub trait SkillStore: Send + Sync {
    async fn user_skills(&self, query: &UserSkillQuery) -> StoreResult<Vec<UserSkill>>;
}

