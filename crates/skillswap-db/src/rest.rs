//! Async client for the hosted backend's tabular REST interface.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value as Json;
use skillswap_common::config::BackendConfig;
use skillswap_common::models::UserSkill;
use skillswap_common::Session;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::query::UserSkillQuery;
use crate::store::SkillStore;

const REST_PREFIX: &str = "/rest/v1";

/// Reads tables over HTTP, authenticated as the session's user.
///
/// ```rust,no_run
/// use skillswap_common::{config, Session};
/// use skillswap_db::{RestStore, SkillStore, UserSkillQuery};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let cfg = config::load(None)?;
///     let session = Session::anonymous(uuid::Uuid::new_v4());
///     let store = RestStore::new(&cfg.backend, &session)?;
///     let rows = store.user_skills(&UserSkillQuery::new().limit(5)).await?;
///     println!("{rows:?}");
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
}

impl RestStore {
    pub fn new(config: &BackendConfig, session: &Session) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("SkillSwap/", env!("CARGO_PKG_VERSION")))
            .default_headers(auth_headers(&config.anon_key, session.bearer(&config.anon_key))?)
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}{REST_PREFIX}", config.url.trim_end_matches('/')),
        })
    }

    // ── Internal ──────────────────────────────────────────────────────────────

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(String, String)],
    ) -> StoreResult<Vec<T>> {
        let url = format!("{}/{table}", self.base_url);
        debug!(%url, ?params, "REST select");

        let resp = self.client.get(&url).query(params).send().await?;
        let status = resp.status();
        if !status.is_success() {
            // PostgREST errors look like {"code", "details", "hint", "message"}
            let message = resp
                .json::<Json>()
                .await
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
                .unwrap_or_else(|| status.to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.json::<Vec<T>>().await?)
    }
}

#[async_trait]
impl SkillStore for RestStore {
    async fn user_skills(&self, query: &UserSkillQuery) -> StoreResult<Vec<UserSkill>> {
        if query.is_unsatisfiable() {
            return Ok(Vec::new());
        }
        self.select("user_skills", &query.to_postgrest_params()).await
    }
}

fn auth_headers(anon_key: &str, bearer: &str) -> StoreResult<HeaderMap> {
    let invalid = |e: reqwest::header::InvalidHeaderValue| StoreError::Credentials(e.to_string());

    let mut h = HeaderMap::new();
    h.insert("apikey", HeaderValue::from_str(anon_key).map_err(invalid)?);
    h.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {bearer}")).map_err(invalid)?,
    );
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillswap_common::config::BackendKind;
    use uuid::Uuid;

    fn backend(url: &str) -> BackendConfig {
        BackendConfig {
            kind: BackendKind::Rest,
            url: url.into(),
            anon_key: "anon-key".into(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn base_url_gets_rest_prefix_once() {
        let store = RestStore::new(&backend("https://abc.example.co/"), &Session::anonymous(Uuid::nil()))
            .unwrap();
        assert_eq!(store.base_url, "https://abc.example.co/rest/v1");
    }

    #[test]
    fn session_token_wins_over_anon_key() {
        let h = auth_headers("anon-key", "user-jwt").unwrap();
        assert_eq!(h["apikey"], "anon-key");
        assert_eq!(h[AUTHORIZATION], "Bearer user-jwt");
    }

    #[test]
    fn header_injection_is_rejected() {
        assert!(auth_headers("bad\nkey", "x").is_err());
    }

    #[tokio::test]
    async fn unsatisfiable_query_skips_network() {
        // Port 9 (discard) is never contacted: the empty IN list short-circuits.
        let store = RestStore::new(&backend("http://127.0.0.1:9"), &Session::anonymous(Uuid::nil()))
            .unwrap();
        let q = UserSkillQuery::new().any_of(crate::query::Column::SkillId, Vec::<Uuid>::new());
        assert!(store.user_skills(&q).await.unwrap().is_empty());
    }
}
