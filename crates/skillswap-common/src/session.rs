//! Explicit session context.
//!
//! Authentication is owned by the hosted backend. A [`Session`] only carries
//! what it handed back (who the caller is and the bearer token to forward),
//! and is passed by value to whatever needs it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// The signed-in user's profile ID
    pub user_id: Uuid,

    /// Bearer token issued by the backend's auth service, if signed in with one
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
}

impl Session {
    /// A session for a user acting with the public anon key only.
    pub fn anonymous(user_id: Uuid) -> Self {
        Self {
            user_id,
            access_token: None,
        }
    }

    pub fn with_token(user_id: Uuid, token: impl Into<String>) -> Self {
        Self {
            user_id,
            access_token: Some(token.into()),
        }
    }

    /// The token to present as `Authorization: Bearer ...`, falling back to the anon key.
    pub fn bearer<'a>(&'a self, anon_key: &'a str) -> &'a str {
        self.access_token.as_deref().unwrap_or(anon_key)
    }
}
