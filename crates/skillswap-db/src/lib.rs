//! # skillswap-db
//!
//! Data access for SkillSwap. The hosted backend owns every table; this crate
//! only reads `user_skills` joined with `skills` and `profiles`, through one of:
//! - **REST** — the backend's PostgREST-style tabular HTTP interface ([`RestStore`])
//! - **PostgreSQL** — a direct connection to the managed database ([`PgStore`])
//! - **Memory** — in-process tables loaded from a JSON fixture ([`MemoryStore`])
//!
//! All three answer the same [`UserSkillQuery`] through the [`SkillStore`] port.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod query;
pub mod repository;
pub mod rest;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use query::{Column, Filter, UserSkillQuery, Value};
pub use rest::RestStore;
pub use store::SkillStore;
