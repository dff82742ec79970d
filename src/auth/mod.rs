//
//  storedesk
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Session state and the rules for when a request needs it.
//!
//! ## Module Structure
//!
//! - [`keyring`]: Session storage in the system keyring
//! - [`store`]: File-backed and in-memory session storage
//! - [`guard`]: The auth guard, the allow-list and the login redirect
//!
//! ## Session Model
//!
//! A [`Session`] is a bearer token plus the cached profile of the logged-in
//! staff member. It is persisted under two fixed keys, [`TOKEN_KEY`] and
//! [`USER_INFO_KEY`], by whichever [`SessionStore`] is in use. Nothing but the
//! store mutates it.
//!
//! ## Example
//!
//! ```rust
//! use storedesk::auth::{MemorySessionStore, SessionStore};
//!
//! let store = MemorySessionStore::new();
//! assert!(store.get().token.is_none());
//!
//! store.set("abc", None).unwrap();
//! assert_eq!(store.get().token.as_deref(), Some("abc"));
//!
//! store.clear();
//! store.clear();
//! assert!(!store.get().is_authenticated());
//! ```

mod guard;
mod keyring;
mod store;

pub use self::guard::*;
pub use self::keyring::*;
pub use self::store::*;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "storedesk.token";

/// Storage key for the cached user profile.
pub const USER_INFO_KEY: &str = "storedesk.user_info";

/// The client-held authentication state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token issued at login.
    pub token: Option<String>,

    /// Cached profile of the logged-in user, as the backend returned it.
    pub user_profile: Option<Value>,
}

impl Session {
    /// An empty session.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// The token with all but its last four characters masked.
    pub fn masked_token(&self) -> Option<String> {
        self.token.as_ref().map(|token| {
            let visible = token.chars().count().saturating_sub(4);
            token
                .chars()
                .enumerate()
                .map(|(i, c)| if i < visible { '*' } else { c })
                .collect()
        })
    }

    /// A display name taken from the cached profile, if it has one.
    pub fn display_name(&self) -> Option<String> {
        let profile = self.user_profile.as_ref()?;
        ["nickname", "realName", "username", "name"]
            .iter()
            .find_map(|field| profile.get(*field).and_then(Value::as_str))
            .map(str::to_string)
    }
}

/// Persistence for the [`Session`].
///
/// Implementations must never fail on [`get`](Self::get): storage that is
/// missing or unreadable reads as an empty session. [`clear`](Self::clear)
/// removes both keys and is safe to call repeatedly.
pub trait SessionStore: Send + Sync {
    /// Reads the current session.
    fn get(&self) -> Session;

    /// Persists a new token and profile, replacing any previous session.
    fn set(&self, token: &str, profile: Option<&Value>) -> anyhow::Result<()>;

    /// Removes the token and the profile.
    fn clear(&self);
}

/// Parses a stored profile blob, discarding it when it is not valid JSON.
pub(crate) fn parse_profile(raw: &str) -> Option<Value> {
    match serde_json::from_str(raw) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("discarding unreadable cached profile: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_authenticated() {
        assert!(!Session::empty().is_authenticated());
        let session = Session {
            token: Some(String::new()),
            user_profile: None,
        };
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_masked_token() {
        let session = Session {
            token: Some("abcdef123".into()),
            user_profile: None,
        };
        assert_eq!(session.masked_token().as_deref(), Some("*****f123"));
    }

    #[test]
    fn test_display_name() {
        let session = Session {
            token: Some("t".into()),
            user_profile: Some(json!({"username": "admin", "nickname": "Ops"})),
        };
        assert_eq!(session.display_name().as_deref(), Some("Ops"));
    }

    #[test]
    fn test_parse_profile() {
        assert_eq!(parse_profile(r#"{"id":1}"#), Some(json!({"id": 1})));
        assert_eq!(parse_profile("null"), None);
        assert_eq!(parse_profile("{"), None);
    }
}
