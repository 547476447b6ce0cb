//! Mutual-match discovery.
//!
//! Two named operations with different semantics:
//!
//! - **broad** ([`find_matches`]): anyone who can teach the caller one of their
//!   needed skills, or who needs one of the caller's offered skills.
//! - **strict** ([`find_mutual_matches`]): only people who do both.
//!
//! Both load the caller's listings first and return nothing, without further
//! reads, when the caller offers nothing or needs nothing. Results hold one
//! entry per counterparty (their best pairing), sorted by descending score and
//! capped.
//!
//! Every read runs sequentially. The plain functions collapse a failed read
//! into an empty list after logging it once; the `try_` functions return the
//! [`MatchError`] so callers can tell failure apart from "nobody matches".

use std::collections::HashMap;

use serde::Serialize;
use skillswap_common::config::MatchingConfig;
use skillswap_common::models::{Profile, Skill, SkillDirection, UserSkill};
use skillswap_db::SkillStore;
use skillswap_db::repository::user_skills;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::{MatchError, MatchStage};
use crate::scorer::{compatibility, exchange_score};

// ── Types ─────────────────────────────────────────────────────────────────────

/// How a counterparty complements the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pairing {
    /// They offer `skill`, which the caller needs.
    TheyTeach,
    /// They need `skill`, which the caller offers.
    TheyLearn,
    /// They offer `skill` to the caller and need `returned` from the caller.
    Exchange { returned: Skill },
}

/// One counterparty in a match list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillMatch {
    pub profile: Profile,
    pub skill: Skill,
    pub score: u8,
    pub pairing: Pairing,
}

/// Which finder to run, for callers choosing at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Broad,
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchLimits {
    /// Result cap for [`find_matches`]
    pub broad: usize,
    /// Result cap for [`find_mutual_matches`]
    pub strict: usize,
    /// Row cap on each candidate query
    pub candidates: usize,
}

impl Default for MatchLimits {
    fn default() -> Self {
        Self::from(&MatchingConfig::default())
    }
}

impl From<&MatchingConfig> for MatchLimits {
    fn from(cfg: &MatchingConfig) -> Self {
        Self {
            broad: cfg.broad_limit,
            strict: cfg.strict_limit,
            candidates: cfg.candidate_limit,
        }
    }
}

// ── Degrade-to-empty entry points ─────────────────────────────────────────────

/// Broad matches for `user_id`; a failed read yields an empty list.
pub async fn find_matches<S: SkillStore + ?Sized>(
    store: &S,
    user_id: Uuid,
    limits: &MatchLimits,
) -> Vec<SkillMatch> {
    degrade(user_id, MatchMode::Broad, try_find_matches(store, user_id, limits).await)
}

/// Strictly bidirectional matches for `user_id`; a failed read yields an empty list.
pub async fn find_mutual_matches<S: SkillStore + ?Sized>(
    store: &S,
    user_id: Uuid,
    limits: &MatchLimits,
) -> Vec<SkillMatch> {
    degrade(user_id, MatchMode::Strict, try_find_mutual_matches(store, user_id, limits).await)
}

/// Runs the finder `mode` selects, degrading failures to an empty list.
pub async fn run_matches<S: SkillStore + ?Sized>(
    store: &S,
    user_id: Uuid,
    mode: MatchMode,
    limits: &MatchLimits,
) -> Vec<SkillMatch> {
    match mode {
        MatchMode::Broad => find_matches(store, user_id, limits).await,
        MatchMode::Strict => find_mutual_matches(store, user_id, limits).await,
    }
}

fn degrade(
    user_id: Uuid,
    mode: MatchMode,
    result: Result<Vec<SkillMatch>, MatchError>,
) -> Vec<SkillMatch> {
    result.unwrap_or_else(|e| {
        error!(%user_id, ?mode, stage = ?e.stage, "Match computation failed, returning no matches: {e}");
        Vec::new()
    })
}

// ── Fallible entry points ─────────────────────────────────────────────────────

/// Runs the finder `mode` selects, returning any read failure.
pub async fn try_run_matches<S: SkillStore + ?Sized>(
    store: &S,
    user_id: Uuid,
    mode: MatchMode,
    limits: &MatchLimits,
) -> Result<Vec<SkillMatch>, MatchError> {
    match mode {
        MatchMode::Broad => try_find_matches(store, user_id, limits).await,
        MatchMode::Strict => try_find_mutual_matches(store, user_id, limits).await,
    }
}

/// Broad matches: counterparties complementing the caller in either direction.
pub async fn try_find_matches<S: SkillStore + ?Sized>(
    store: &S,
    user_id: Uuid,
    limits: &MatchLimits,
) -> Result<Vec<SkillMatch>, MatchError> {
    let Some(own) = load_own_skills(store, user_id).await? else {
        return Ok(Vec::new());
    };
    let mut found = Vec::new();

    // Teachers first, so they win score ties in `rank`.
    for mine_as in [SkillDirection::Needed, SkillDirection::Offered] {
        let rows = user_skills::find_counterparts(
            store,
            &own.skill_ids(mine_as),
            mine_as.opposite(),
            user_id,
            limits.candidates,
        )
        .await
        .map_err(MatchError::at(MatchStage::Candidates))?;

        for row in rows {
            let Some(mine) = own.listing(row.skill_id, mine_as) else {
                continue;
            };
            let (score, pairing) = match mine_as {
                SkillDirection::Needed => (compatibility(row.level, mine.level), Pairing::TheyTeach),
                SkillDirection::Offered => (compatibility(mine.level, row.level), Pairing::TheyLearn),
            };
            if let Some(m) = into_match(row, score, pairing) {
                found.push(m);
            }
        }
    }

    let ranked = rank(found, limits.broad);
    info!(%user_id, matches = ranked.len(), "Broad match search complete");
    Ok(ranked)
}

/// Strict matches: counterparties who need something the caller offers AND
/// offer something the caller needs.
///
/// Issues one reciprocal lookup per (candidate listing, needed skill) pair.
pub async fn try_find_mutual_matches<S: SkillStore + ?Sized>(
    store: &S,
    user_id: Uuid,
    limits: &MatchLimits,
) -> Result<Vec<SkillMatch>, MatchError> {
    let Some(own) = load_own_skills(store, user_id).await? else {
        return Ok(Vec::new());
    };
    let mut found = Vec::new();

    let learners = user_skills::find_counterparts(
        store,
        &own.skill_ids(SkillDirection::Offered),
        SkillDirection::Offered.opposite(),
        user_id,
        limits.candidates,
    )
    .await
    .map_err(MatchError::at(MatchStage::Candidates))?;

    for row in learners {
        let Some(my_offer) = own.listing(row.skill_id, SkillDirection::Offered) else {
            continue;
        };
        let Some(profile) = row.profile.as_ref() else {
            warn!(user_id = %row.user_id, "Candidate has no profile row, skipping");
            continue;
        };
        let i_teach = compatibility(my_offer.level, row.level);

        for my_need in &own.needed {
            let Some(their_offer) = user_skills::find_listing(
                store,
                row.user_id,
                my_need.skill_id,
                my_need.direction.opposite(),
            )
            .await
            .map_err(MatchError::at(MatchStage::PairingLookup))?
            else {
                continue;
            };

            let they_teach = compatibility(their_offer.level, my_need.level);
            found.push(SkillMatch {
                profile: profile.clone(),
                skill: their_offer.skill,
                score: exchange_score(i_teach, they_teach),
                pairing: Pairing::Exchange {
                    returned: row.skill.clone(),
                },
            });
        }
    }

    let ranked = rank(found, limits.strict);
    info!(%user_id, matches = ranked.len(), "Mutual match search complete");
    Ok(ranked)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// The caller's listings, split by direction.
struct OwnSkills {
    offered: Vec<UserSkill>,
    needed: Vec<UserSkill>,
}

impl OwnSkills {
    fn side(&self, direction: SkillDirection) -> &[UserSkill] {
        match direction {
            SkillDirection::Offered => &self.offered,
            SkillDirection::Needed => &self.needed,
        }
    }

    fn skill_ids(&self, direction: SkillDirection) -> Vec<Uuid> {
        self.side(direction).iter().map(|s| s.skill_id).collect()
    }

    fn listing(&self, skill_id: Uuid, direction: SkillDirection) -> Option<&UserSkill> {
        self.side(direction).iter().find(|s| s.skill_id == skill_id)
    }
}

/// `None` when the caller lacks offered or needed skills; no partial matching.
async fn load_own_skills<S: SkillStore + ?Sized>(
    store: &S,
    user_id: Uuid,
) -> Result<Option<OwnSkills>, MatchError> {
    let rows = user_skills::list_for_user(store, user_id)
        .await
        .map_err(MatchError::at(MatchStage::OwnSkills))?;

    let (offered, needed): (Vec<_>, Vec<_>) = rows
        .into_iter()
        .partition(|s| s.direction == SkillDirection::Offered);

    if offered.is_empty() || needed.is_empty() {
        debug!(
            %user_id,
            offered = offered.len(),
            needed = needed.len(),
            "Caller must both offer and need a skill, skipping search"
        );
        return Ok(None);
    }
    Ok(Some(OwnSkills { offered, needed }))
}

fn into_match(row: UserSkill, score: u8, pairing: Pairing) -> Option<SkillMatch> {
    let Some(profile) = row.profile else {
        warn!(user_id = %row.user_id, "Candidate has no profile row, skipping");
        return None;
    };
    Some(SkillMatch {
        profile,
        skill: row.skill,
        score,
        pairing,
    })
}

/// One entry per counterparty (highest score; the earlier one on ties),
/// sorted by descending score, at most `cap` long.
fn rank(found: Vec<SkillMatch>, cap: usize) -> Vec<SkillMatch> {
    let mut best: Vec<SkillMatch> = Vec::with_capacity(found.len());
    let mut slot: HashMap<Uuid, usize> = HashMap::new();

    for m in found {
        match slot.get(&m.profile.id) {
            Some(&i) if m.score > best[i].score => best[i] = m,
            Some(_) => {}
            None => {
                slot.insert(m.profile.id, best.len());
                best.push(m);
            }
        }
    }

    best.sort_by(|a, b| b.score.cmp(&a.score));
    best.truncate(cap);
    best
}
