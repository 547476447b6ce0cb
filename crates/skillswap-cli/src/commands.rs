//! Subcommand implementations. Each returns the text to print on stdout.

use std::path::Path;

use anyhow::{Context, bail};
use skillswap_common::config::{AppConfig, BackendKind};
use skillswap_common::models::SwapStatus;
use skillswap_common::validation::parse_user_id;
use skillswap_common::Session;
use skillswap_db::{MemoryStore, PgStore, RestStore, SkillStore};
use skillswap_matching::scorer::compatibility_from_labels;
use skillswap_matching::{MatchLimits, MatchMode, SkillMatch, run_matches, try_run_matches};

pub struct MatchArgs<'a> {
    pub user_id: &'a str,
    pub mode: MatchMode,
    pub limit: Option<usize>,
    pub fail_loud: bool,
    pub plain: bool,
}

pub async fn matches(
    config: &AppConfig,
    fixture: Option<&Path>,
    token: Option<String>,
    args: MatchArgs<'_>,
) -> anyhow::Result<String> {
    let user_id = parse_user_id(args.user_id)?;
    let session = Session {
        user_id,
        access_token: token,
    };
    let store = open_store(config, fixture, &session).await?;

    let mut limits = MatchLimits::from(&config.matching);
    if let Some(n) = args.limit {
        if n == 0 {
            bail!("--limit must be at least 1");
        }
        limits.broad = n;
        limits.strict = n;
    }

    let found = search(store.as_ref(), &session, args.mode, &limits, args.fail_loud).await?;
    if args.plain {
        Ok(render_plain(&found))
    } else {
        Ok(serde_json::to_string_pretty(&found)?)
    }
}

/// Pick the data source: a fixture wins over the configured backend.
async fn open_store(
    config: &AppConfig,
    fixture: Option<&Path>,
    session: &Session,
) -> anyhow::Result<Box<dyn SkillStore>> {
    if let Some(path) = fixture {
        let store = MemoryStore::load(path)
            .await
            .with_context(|| format!("loading fixture {}", path.display()))?;
        return Ok(Box::new(store));
    }

    match config.backend.kind {
        BackendKind::Rest => {
            tracing::info!("Using REST backend at {}", config.backend.url);
            Ok(Box::new(RestStore::new(&config.backend, session)?))
        }
        BackendKind::Postgres => {
            if config.database.url.is_empty() {
                bail!("backend.kind is \"postgres\" but database.url is not set");
            }
            let store = PgStore::connect(&config.database).await?;
            if !store.health_check().await {
                bail!("database at database.url is not answering queries");
            }
            Ok(Box::new(store))
        }
    }
}

async fn search(
    store: &dyn SkillStore,
    session: &Session,
    mode: MatchMode,
    limits: &MatchLimits,
    fail_loud: bool,
) -> anyhow::Result<Vec<SkillMatch>> {
    if fail_loud {
        Ok(try_run_matches(store, session.user_id, mode, limits)
            .await
            .context("match search failed")?)
    } else {
        Ok(run_matches(store, session.user_id, mode, limits).await)
    }
}

/// `name<TAB>skill<TAB>score`, one match per line.
fn render_plain(found: &[SkillMatch]) -> String {
    found
        .iter()
        .map(|m| format!("{}\t{}\t{}", m.profile.label(), m.skill.name, m.score))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn score(teacher: &str, learner: &str) -> anyhow::Result<String> {
    Ok(compatibility_from_labels(teacher, learner)?.to_string())
}

pub fn check_transition(from: &str, to: &str) -> anyhow::Result<String> {
    let from: SwapStatus = from.parse()?;
    let to: SwapStatus = to.parse()?;
    from.check_transition(to)?;
    Ok(format!("{from} -> {to}: allowed"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillswap_common::models::{Proficiency, SkillDirection};
    use uuid::Uuid;

    fn world() -> (MemoryStore, Uuid) {
        let mut store = MemoryStore::new();
        let me = store.add_profile("Me");
        let tutor = store.add_profile("Tutor");
        let guitar = store.add_skill("Guitar", None);
        let welsh = store.add_skill("Welsh", Some("Languages"));
        store.list_skill(me, guitar, SkillDirection::Offered, Proficiency::Advanced);
        store.list_skill(me, welsh, SkillDirection::Needed, Proficiency::Beginner);
        store.list_skill(tutor, welsh, SkillDirection::Offered, Proficiency::Advanced);
        (store, me)
    }

    async fn search_json(store: &MemoryStore, session: &Session, mode: MatchMode) -> serde_json::Value {
        let found = search(store, session, mode, &MatchLimits::default(), true)
            .await
            .unwrap();
        serde_json::to_value(found).unwrap()
    }

    #[tokio::test]
    async fn renders_matches_as_json() {
        let (store, me) = world();
        let json = search_json(&store, &Session::anonymous(me), MatchMode::Broad).await;
        assert_eq!(json[0]["profile"]["display_name"], "Tutor");
        assert_eq!(json[0]["skill"]["name"], "Welsh");
        assert_eq!(json[0]["score"], 100);
        assert_eq!(json[0]["pairing"]["kind"], "they_teach");
    }

    #[tokio::test]
    async fn strict_mode_prints_empty_list_without_partner() {
        let (store, me) = world();
        let found = search(
            &store,
            &Session::anonymous(me),
            MatchMode::Strict,
            &MatchLimits::default(),
            false,
        )
        .await
        .unwrap();
        assert_eq!(serde_json::to_string_pretty(&found).unwrap(), "[]");
        assert_eq!(render_plain(&found), "");
    }

    #[tokio::test]
    async fn plain_output_uses_profile_labels() {
        let (mut store, me) = world();
        let cymraeg = store.add_skill("Cymraeg", None);
        let anon = store.add_profile("   ");
        store.list_skill(me, cymraeg, SkillDirection::Needed, Proficiency::Beginner);
        store.list_skill(anon, cymraeg, SkillDirection::Offered, Proficiency::Beginner);

        let found = search(
            &store,
            &Session::anonymous(me),
            MatchMode::Broad,
            &MatchLimits::default(),
            true,
        )
        .await
        .unwrap();
        let out = render_plain(&found);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Tutor\tWelsh\t100");
        let fallback = format!("user-{}", &anon.simple().to_string()[..8]);
        assert_eq!(lines[1], format!("{fallback}\tCymraeg\t80"));
    }

    #[tokio::test]
    async fn demo_fixture_ranks_both_variants() {
        let path = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures/demo.json"));
        let store = MemoryStore::load(path).await.unwrap();
        let ada = Session::anonymous(parse_user_id("0191d2a4-7c00-7000-8000-000000000001").unwrap());

        let broad = search_json(&store, &ada, MatchMode::Broad).await;
        let names: Vec<&str> = broad
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["profile"]["display_name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Benito", "Dara", "Chen"]);

        let strict = search_json(&store, &ada, MatchMode::Strict).await;
        assert_eq!(strict.as_array().unwrap().len(), 1);
        assert_eq!(strict[0]["profile"]["display_name"], "Benito");
        assert_eq!(strict[0]["pairing"]["returned"]["name"], "Guitar");
    }

    #[test]
    fn score_command_prints_integer() {
        assert_eq!(score("intermediate", "intermediate").unwrap(), "80");
        assert!(score("wizard", "beginner").is_err());
    }

    #[test]
    fn transition_command_rejects_going_back() {
        assert_eq!(
            check_transition("pending", "accepted").unwrap(),
            "pending -> accepted: allowed"
        );
        let err = check_transition("completed", "in_progress").unwrap_err();
        assert!(err.to_string().contains("cannot move"));
    }
}
