//! # skillswap-matching
//!
//! Finds people to swap skills with.
//!
//! - [`scorer`] — how well a teacher's proficiency suits a learner's.
//! - [`finder`] — the broad finder (either direction) and the strict finder
//!   (both directions), each in a degrade-to-empty and a `try_` flavour.

pub mod error;
pub mod finder;
pub mod scorer;

pub use error::{MatchError, MatchStage};
pub use finder::{
    MatchLimits, MatchMode, Pairing, SkillMatch, find_matches, find_mutual_matches, run_matches,
    try_find_matches, try_find_mutual_matches, try_run_matches,
};
pub use scorer::compatibility;
