//! Repository layer — named reads built on the [`SkillStore`](crate::SkillStore) port.

pub mod user_skills;
