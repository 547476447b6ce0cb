//! # skillswap-common
//!
//! Shared types, configuration, error handling, and the explicit session context
//! used across all SkillSwap crates. No matching logic lives here, only the
//! primitives and contracts the other crates agree on.

pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod validation;

pub use error::{SkillSwapError, SkillSwapResult};
pub use session::Session;
