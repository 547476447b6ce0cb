//! User-skill repository — the reads the match finder issues.

use skillswap_common::models::{SkillDirection, UserSkill};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::query::{Column, UserSkillQuery};
use crate::store::SkillStore;

/// Every skill a user lists, in either direction.
pub async fn list_for_user<S: SkillStore + ?Sized>(
    store: &S,
    user_id: Uuid,
) -> StoreResult<Vec<UserSkill>> {
    store
        .user_skills(&UserSkillQuery::new().eq(Column::UserId, user_id))
        .await
}

/// Other users listing any of `skill_ids` under `direction`, with their profiles.
///
/// Offered listings come back most advanced first and needed listings least
/// advanced first, so the row cap keeps the best-scoring candidates.
///
/// Over REST the order is delegated to PostgREST (`order=proficiency_level.desc`),
/// which follows the column's enum order. If `proficiency_level` is plain text
/// the sort is alphabetical and the cap may drop advanced rows; `PgStore` and
/// `MemoryStore` always order by rank.
pub async fn find_counterparts<S: SkillStore + ?Sized>(
    store: &S,
    skill_ids: &[Uuid],
    direction: SkillDirection,
    exclude_user: Uuid,
    limit: usize,
) -> StoreResult<Vec<UserSkill>> {
    let query = UserSkillQuery::new()
        .any_of(Column::SkillId, skill_ids.iter().copied())
        .eq(Column::SkillType, direction)
        .neq(Column::UserId, exclude_user)
        .with_profile()
        .order_by(Column::ProficiencyLevel, direction == SkillDirection::Needed)
        .limit(limit);
    store.user_skills(&query).await
}

/// A single listing of `skill_id` by `user_id` under `direction`, if one exists.
pub async fn find_listing<S: SkillStore + ?Sized>(
    store: &S,
    user_id: Uuid,
    skill_id: Uuid,
    direction: SkillDirection,
) -> StoreResult<Option<UserSkill>> {
    let query = UserSkillQuery::new()
        .eq(Column::UserId, user_id)
        .eq(Column::SkillId, skill_id)
        .eq(Column::SkillType, direction)
        .limit(1);
    Ok(store.user_skills(&query).await?.into_iter().next())
}
