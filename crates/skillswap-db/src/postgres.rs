//! Direct PostgreSQL access to the hosted database.
//!
//! The hosted backend is Postgres underneath, so operators with a connection
//! string can skip the HTTP layer. Queries are read-only joins over the
//! backend's own tables; this crate never creates or migrates anything.

use async_trait::async_trait;
use skillswap_common::config::DatabaseConfig;
use skillswap_common::models::{Profile, Skill, UserSkill};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, QueryBuilder, Row};
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::query::{Column, Filter, UserSkillQuery, Value};
use crate::store::SkillStore;

const SELECT_COLUMNS: &str = r#"
    SELECT us.id, us.user_id, us.skill_id,
           us.skill_type::text AS skill_type,
           us.proficiency_level::text AS proficiency_level,
           s.name AS skill_name, s.category AS skill_category"#;

const PROFILE_COLUMNS: &str = r#",
           p.id AS profile_id, p.display_name, p.bio,
           COALESCE(p.points, 0)::bigint AS points,
           COALESCE(p.swaps_completed, 0)::int4 AS swaps_completed"#;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        tracing::info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;
        tracing::info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Health check — verify the database is reachable.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[async_trait]
impl SkillStore for PgStore {
    async fn user_skills(&self, query: &UserSkillQuery) -> StoreResult<Vec<UserSkill>> {
        if query.is_unsatisfiable() {
            return Ok(Vec::new());
        }
        let mut qb = build_select(query);
        debug!(sql = qb.sql(), "Postgres select");
        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| decode_row(row, query.includes_profile()))
            .collect()
    }
}

// ── SQL rendering ─────────────────────────────────────────────────────────────

fn column_sql(col: Column) -> &'static str {
    match col {
        Column::UserId => "us.user_id",
        Column::SkillId => "us.skill_id",
        Column::SkillType => "us.skill_type::text",
        Column::ProficiencyLevel => "us.proficiency_level::text",
    }
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: &Value) {
    match value {
        Value::Id(id) => qb.push_bind(*id),
        Value::Text(s) => qb.push_bind(s.clone()),
    };
}

pub(crate) fn build_select(query: &UserSkillQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(SELECT_COLUMNS);
    if query.includes_profile() {
        qb.push(PROFILE_COLUMNS);
    }
    qb.push(" FROM user_skills us JOIN skills s ON s.id = us.skill_id");
    if query.includes_profile() {
        qb.push(" LEFT JOIN profiles p ON p.id = us.user_id");
    }

    for (i, filter) in query.filters().iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        match filter {
            Filter::Eq(col, v) => {
                qb.push(column_sql(*col)).push(" = ");
                push_value(&mut qb, v);
            }
            Filter::Neq(col, v) => {
                qb.push(column_sql(*col)).push(" <> ");
                push_value(&mut qb, v);
            }
            Filter::In(col, vs) => {
                qb.push(column_sql(*col)).push(" IN (");
                for (j, v) in vs.iter().enumerate() {
                    if j > 0 {
                        qb.push(", ");
                    }
                    push_value(&mut qb, v);
                }
                qb.push(")");
            }
        }
    }

    if let Some((col, ascending)) = query.ordering() {
        let dir = if ascending { "ASC" } else { "DESC" };
        qb.push(" ORDER BY ");
        match col {
            // Rank order regardless of whether the column is text or an enum.
            Column::ProficiencyLevel => qb.push(
                "CASE us.proficiency_level::text \
                 WHEN 'beginner' THEN 1 WHEN 'intermediate' THEN 2 WHEN 'advanced' THEN 3 END",
            ),
            other => qb.push(column_sql(other)),
        };
        qb.push(" ").push(dir);
    }

    if let Some(n) = query.row_limit() {
        qb.push(" LIMIT ").push_bind(n as i64);
    }
    qb
}

// ── Row decoding ──────────────────────────────────────────────────────────────

fn decode<T: std::str::FromStr>(row: &PgRow, col: &str) -> StoreResult<T>
where
    T::Err: std::fmt::Display,
{
    let s: String = row.try_get(col)?;
    s.parse()
        .map_err(|e: T::Err| StoreError::Decode(format!("{col}: {e}")))
}

fn decode_row(row: &PgRow, with_profile: bool) -> StoreResult<UserSkill> {
    let skill_id: Uuid = row.try_get("skill_id")?;
    let user_id: Uuid = row.try_get("user_id")?;

    let profile = if with_profile {
        let profile_id: Option<Uuid> = row.try_get("profile_id")?;
        match profile_id {
            Some(id) => Some(Profile {
                id,
                display_name: row.try_get("display_name")?,
                bio: row.try_get("bio")?,
                points: row.try_get("points")?,
                swaps_completed: row.try_get("swaps_completed")?,
            }),
            None => None,
        }
    } else {
        None
    };

    Ok(UserSkill {
        id: row.try_get("id")?,
        user_id,
        skill_id,
        direction: decode(row, "skill_type")?,
        level: decode(row, "proficiency_level")?,
        skill: Skill {
            id: skill_id,
            name: row.try_get("skill_name")?,
            category: row.try_get("skill_category")?,
        },
        profile,
    })
}
