//! Match finder errors.

use std::fmt;

use skillswap_db::StoreError;
use thiserror::Error;

/// Which read was in flight when the backend failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStage {
    /// Loading the caller's own offered and needed skills
    OwnSkills,
    /// Loading counterparties that list complementary skills
    Candidates,
    /// Checking whether a candidate offers one of the caller's needed skills (strict only)
    PairingLookup,
}

impl fmt::Display for MatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OwnSkills => "loading own skills",
            Self::Candidates => "loading candidates",
            Self::PairingLookup => "checking a reciprocal listing",
        })
    }
}

/// The only failure the finder distinguishes: a remote read failed.
#[derive(Debug, Error)]
#[error("Remote read failed while {stage}: {source}")]
pub struct MatchError {
    pub stage: MatchStage,
    #[source]
    pub source: StoreError,
}

impl MatchError {
    pub(crate) fn at(stage: MatchStage) -> impl FnOnce(StoreError) -> Self {
        move |source| Self { stage, source }
    }
}
