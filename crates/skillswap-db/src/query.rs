//! Fluent builder for reads against `user_skills`.
//!
//! One query value describes filters, embedding, ordering and a row cap. Each
//! store renders it in its own dialect: PostgREST parameters, SQL, or an
//! in-memory predicate.

use std::cmp::Ordering;
use std::fmt;

use skillswap_common::models::{Proficiency, SkillDirection, UserSkill};
use uuid::Uuid;

// ── Columns and values ────────────────────────────────────────────────────────

/// Filterable columns of `user_skills`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    UserId,
    SkillId,
    SkillType,
    ProficiencyLevel,
}

impl Column {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserId => "user_id",
            Self::SkillId => "skill_id",
            Self::SkillType => "skill_type",
            Self::ProficiencyLevel => "proficiency_level",
        }
    }

    fn value_of(self, row: &UserSkill) -> Value {
        match self {
            Self::UserId => Value::Id(row.user_id),
            Self::SkillId => Value::Id(row.skill_id),
            Self::SkillType => row.direction.into(),
            Self::ProficiencyLevel => row.level.into(),
        }
    }

    /// Row ordering for this column. Proficiency sorts by rank, not alphabetically.
    pub(crate) fn compare(self, a: &UserSkill, b: &UserSkill) -> Ordering {
        match self {
            Self::UserId => a.user_id.cmp(&b.user_id),
            Self::SkillId => a.skill_id.cmp(&b.skill_id),
            Self::SkillType => a.direction.as_str().cmp(b.direction.as_str()),
            Self::ProficiencyLevel => a.level.cmp(&b.level),
        }
    }
}

/// A filter operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Id(Uuid),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<Uuid> for Value {
    fn from(id: Uuid) -> Self {
        Self::Id(id)
    }
}

impl From<SkillDirection> for Value {
    fn from(d: SkillDirection) -> Self {
        Self::Text(d.as_str().to_owned())
    }
}

impl From<Proficiency> for Value {
    fn from(p: Proficiency) -> Self {
        Self::Text(p.as_str().to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Eq(Column, Value),
    Neq(Column, Value),
    In(Column, Vec<Value>),
}

impl Filter {
    fn matches(&self, row: &UserSkill) -> bool {
        match self {
            Self::Eq(col, v) => col.value_of(row) == *v,
            Self::Neq(col, v) => col.value_of(row) != *v,
            Self::In(col, vs) => {
                let actual = col.value_of(row);
                vs.iter().any(|v| *v == actual)
            }
        }
    }

    /// PostgREST `column=op.operand` pair.
    fn to_param(&self) -> (String, String) {
        match self {
            Self::Eq(col, v) => (col.as_str().to_owned(), format!("eq.{v}")),
            Self::Neq(col, v) => (col.as_str().to_owned(), format!("neq.{v}")),
            Self::In(col, vs) => {
                let list = vs.iter().map(Value::to_string).collect::<Vec<_>>().join(",");
                (col.as_str().to_owned(), format!("in.({list})"))
            }
        }
    }
}

// ── Query builder ─────────────────────────────────────────────────────────────

/// A read of `user_skills` joined with `skills`.
///
/// ```
/// use skillswap_db::query::{Column, UserSkillQuery};
/// use skillswap_common::models::SkillDirection;
/// use uuid::Uuid;
///
/// let me = Uuid::new_v4();
/// let q = UserSkillQuery::new()
///     .eq(Column::SkillType, SkillDirection::Offered)
///     .neq(Column::UserId, me)
///     .with_profile()
///     .limit(50);
/// assert_eq!(q.row_limit(), Some(50));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSkillQuery {
    filters: Vec<Filter>,
    with_profile: bool,
    order: Option<(Column, bool)>,
    limit: Option<usize>,
}

impl UserSkillQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: Column, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(column, value.into()));
        self
    }

    pub fn neq(mut self, column: Column, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Neq(column, value.into()));
        self
    }

    pub fn any_of<V: Into<Value>>(mut self, column: Column, values: impl IntoIterator<Item = V>) -> Self {
        self.filters
            .push(Filter::In(column, values.into_iter().map(Into::into).collect()));
        self
    }

    /// Embed the owning user's profile in each row.
    pub fn with_profile(mut self) -> Self {
        self.with_profile = true;
        self
    }

    pub fn order_by(mut self, column: Column, ascending: bool) -> Self {
        self.order = Some((column, ascending));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn includes_profile(&self) -> bool {
        self.with_profile
    }

    pub fn ordering(&self) -> Option<(Column, bool)> {
        self.order
    }

    pub fn row_limit(&self) -> Option<usize> {
        self.limit
    }

    /// True when an empty `IN` list guarantees no rows, so stores can skip the round-trip.
    pub fn is_unsatisfiable(&self) -> bool {
        self.filters
            .iter()
            .any(|f| matches!(f, Filter::In(_, vs) if vs.is_empty()))
    }

    /// Whether a joined row passes every filter.
    pub fn matches(&self, row: &UserSkill) -> bool {
        self.filters.iter().all(|f| f.matches(row))
    }

    /// Render as PostgREST query-string pairs, `select` first.
    pub fn to_postgrest_params(&self) -> Vec<(String, String)> {
        let select = if self.with_profile {
            "*,skills(*),profiles(*)"
        } else {
            "*,skills(*)"
        };
        let mut params = vec![("select".to_owned(), select.to_owned())];
        params.extend(self.filters.iter().map(Filter::to_param));
        if let Some((col, ascending)) = self.order {
            let dir = if ascending { "asc" } else { "desc" };
            params.push(("order".to_owned(), format!("{}.{dir}", col.as_str())));
        }
        if let Some(n) = self.limit {
            params.push(("limit".to_owned(), n.to_string()));
        }
        params
    }
}
