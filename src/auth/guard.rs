//
//  storedesk
//  auth/guard.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Auth Guard
//!
//! Decides whether a request needs a token, attaches it, and reacts when the
//! backend says the session is no longer good.
//!
//! ## Allow-List
//!
//! Paths containing any of [`PUBLIC_PATHS`] skip the "must have a token"
//! check. Matching is substring containment on the normalized path, so a
//! prefix also matches behind an API version segment.
//!
//! ## Auth Failures
//!
//! On HTTP 401, on HTTP 403 without a token, or when a protected request is
//! attempted without a token, the guard clears the session and sends the user
//! to the login view with the current location as the `redirect` parameter.
//! Already being on the login view suppresses the navigation.
//!
//! The session is cleared on every failure. The redirect happens at most once
//! until the next successful login, however many in-flight requests fail
//! together. A 401 for a token that is no longer the stored one (a new login
//! happened while the request was in flight) leaves the new session alone.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use console::style;
use serde_json::Value;
use tracing::{debug, info};

use super::{Session, SessionStore};

/// Path prefixes that never require a token.
pub const PUBLIC_PATHS: &[&str] = &["/auth/login", "/auth/captcha", "/public/"];

/// The login view users are sent to when their session ends.
pub const LOGIN_PATH: &str = "/login";

/// Query parameter carrying the location to return to after login.
pub const REDIRECT_PARAM: &str = "redirect";

/// Where the user is and how to move them.
///
/// The guard never navigates on its own; it asks the navigator, which lets
/// the CLI print a hint and lets tests record the target.
pub trait Navigator: Send + Sync {
    /// The location the user is currently at, e.g. `/orders?page=2`.
    fn current_location(&self) -> String;

    /// Sends the user to `target`.
    fn navigate(&self, target: &str);
}

/// Navigator for terminal sessions.
///
/// The "location" is the view the running command corresponds to;
/// navigating to the login view prints how to sign in again.
#[derive(Debug, Clone)]
pub struct TerminalNavigator {
    location: String,
}

impl TerminalNavigator {
    /// Creates a navigator reporting `location` as the current view.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl Navigator for TerminalNavigator {
    fn current_location(&self) -> String {
        self.location.clone()
    }

    fn navigate(&self, target: &str) {
        eprintln!(
            "{} Your session has ended. Run '{}' to sign in again.",
            style("!").yellow(),
            style("sd auth login").bold()
        );
        debug!(target, "login redirect issued");
    }
}

/// Navigator that remembers every target it was sent to.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    location: Mutex<String>,
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    /// Creates a navigator positioned at `location`.
    pub fn at(location: impl Into<String>) -> Self {
        Self {
            location: Mutex::new(location.into()),
            visited: Mutex::new(Vec::new()),
        }
    }

    /// Moves to `location` without recording a navigation, as when the login
    /// view sends the user back after signing in.
    pub fn move_to(&self, location: impl Into<String>) {
        *self.location.lock().unwrap_or_else(|e| e.into_inner()) = location.into();
    }

    /// Every navigation target so far, oldest first.
    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_location(&self) -> String {
        self.location
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn navigate(&self, target: &str) {
        *self.location.lock().unwrap_or_else(|e| e.into_inner()) = target.to_string();
        self.visited
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(target.to_string());
    }
}

/// Per-request authentication policy and the session's failure path.
pub struct AuthGuard {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    public_paths: Vec<String>,
    login_path: String,
    redirect_issued: AtomicBool,
}

impl AuthGuard {
    /// Creates a guard with the default allow-list and login path.
    pub fn new(store: Arc<dyn SessionStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            store,
            navigator,
            public_paths: PUBLIC_PATHS.iter().map(|p| p.to_string()).collect(),
            login_path: LOGIN_PATH.to_string(),
            redirect_issued: AtomicBool::new(false),
        }
    }

    /// Replaces the allow-list.
    pub fn with_public_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.public_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the login view path.
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// The current session.
    pub fn session(&self) -> Session {
        self.store.get()
    }

    /// Whether a request to `normalized_path` must carry a token.
    pub fn requires_auth(&self, normalized_path: &str) -> bool {
        !self
            .public_paths
            .iter()
            .any(|prefix| normalized_path.contains(prefix.as_str()))
    }

    /// Stores a freshly issued session and re-arms the redirect latch.
    pub fn establish(&self, token: &str, profile: Option<&Value>) -> Result<()> {
        self.store.set(token, profile)?;
        self.redirect_issued.store(false, Ordering::Release);
        info!("session established");
        Ok(())
    }

    /// Ends the session on explicit logout.
    pub fn end(&self) {
        self.store.clear();
        info!("session cleared on logout");
    }

    /// Clears the session and redirects to the login view.
    ///
    /// The session is always cleared. Returns `true` if this call performed
    /// the redirect, `false` if an earlier failure already did.
    pub fn handle_auth_failure(&self) -> bool {
        self.store.clear();

        if self.redirect_issued.swap(true, Ordering::AcqRel) {
            debug!("login redirect already issued");
            return false;
        }

        let location = self.navigator.current_location();
        if self.is_login_view(&location) {
            debug!("already on the login view, not redirecting");
            return true;
        }

        let target = self.login_redirect(&location);
        info!(target = %target, "redirecting to login");
        self.navigator.navigate(&target);
        true
    }

    /// Handles the backend rejecting `sent_token`.
    ///
    /// Only acts when `sent_token` is still the stored token; a session that
    /// replaced it while the request was in flight is kept.
    pub fn handle_rejected_token(&self, sent_token: &str) -> bool {
        if self.store.get().token.as_deref() != Some(sent_token) {
            debug!("rejected token is no longer current, keeping session");
            return false;
        }
        self.handle_auth_failure()
    }

    /// Whether the redirect latch is currently set.
    pub fn redirect_issued(&self) -> bool {
        self.redirect_issued.load(Ordering::Acquire)
    }

    /// The login view URL that returns to `location` afterwards.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use storedesk::auth::{AuthGuard, MemorySessionStore, RecordingNavigator};
    ///
    /// let guard = AuthGuard::new(
    ///     Arc::new(MemorySessionStore::new()),
    ///     Arc::new(RecordingNavigator::default()),
    /// );
    /// assert_eq!(
    ///     guard.login_redirect("/orders?page=2"),
    ///     "/login?redirect=%2Forders%3Fpage%3D2"
    /// );
    /// ```
    pub fn login_redirect(&self, location: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(location.as_bytes()).collect();
        format!("{}?{}={}", self.login_path, REDIRECT_PARAM, encoded)
    }

    fn is_login_view(&self, location: &str) -> bool {
        let path = location.split(['?', '#']).next().unwrap_or_default();
        path.trim_end_matches('/') == self.login_path.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemorySessionStore;

    fn guard_at(location: &str) -> (AuthGuard, Arc<MemorySessionStore>, Arc<RecordingNavigator>) {
        let store = Arc::new(MemorySessionStore::with_token("tok"));
        let navigator = Arc::new(RecordingNavigator::at(location));
        let guard = AuthGuard::new(store.clone(), navigator.clone());
        (guard, store, navigator)
    }

    #[test]
    fn test_allow_list_uses_substring_match() {
        let (guard, _, _) = guard_at("/");
        assert!(!guard.requires_auth("/auth/login"));
        assert!(!guard.requires_auth("/v2/auth/login"));
        assert!(!guard.requires_auth("/public/banners"));
        assert!(guard.requires_auth("/orders"));
        assert!(guard.requires_auth("/auth/logout"));
    }

    #[test]
    fn test_failure_clears_and_redirects_once() {
        let (guard, store, navigator) = guard_at("/orders?page=2");

        assert!(guard.handle_auth_failure());
        assert!(!guard.handle_auth_failure());

        assert!(!store.get().is_authenticated());
        assert_eq!(
            navigator.visited(),
            vec!["/login?redirect=%2Forders%3Fpage%3D2".to_string()]
        );
    }

    #[test]
    fn test_no_redirect_from_login_view() {
        let (guard, store, navigator) = guard_at("/login?redirect=%2Fhome");
        assert!(guard.handle_auth_failure());
        assert!(navigator.visited().is_empty());
        assert!(!store.get().is_authenticated());
    }

    #[test]
    fn test_establish_rearms_latch() {
        let (guard, store, navigator) = guard_at("/users");
        guard.handle_auth_failure();
        assert!(guard.redirect_issued());
        assert_eq!(navigator.current_location(), "/login?redirect=%2Fusers");

        guard.establish("fresh", None).unwrap();
        navigator.move_to("/users");
        assert!(!guard.redirect_issued());
        assert_eq!(store.get().token.as_deref(), Some("fresh"));

        assert!(guard.handle_auth_failure());
        assert_eq!(
            navigator.visited(),
            vec!["/login?redirect=%2Fusers", "/login?redirect=%2Fusers"]
        );
    }

    #[test]
    fn test_latched_failure_still_clears_session() {
        let (guard, store, navigator) = guard_at("/orders");
        assert!(guard.handle_auth_failure());

        // A token written outside `establish`, e.g. by another process.
        store.set("second", None).unwrap();
        assert!(!guard.handle_auth_failure());

        assert!(store.get().token.is_none());
        assert_eq!(navigator.visited().len(), 1);
    }

    #[test]
    fn test_rejected_stale_token_keeps_new_session() {
        let (guard, store, navigator) = guard_at("/orders");
        guard.establish("t2", None).unwrap();

        assert!(!guard.handle_rejected_token("t1"));
        assert_eq!(store.get().token.as_deref(), Some("t2"));
        assert!(navigator.visited().is_empty());

        assert!(guard.handle_rejected_token("t2"));
        assert!(store.get().token.is_none());
        assert_eq!(navigator.visited().len(), 1);
    }

    #[test]
    fn test_custom_allow_list_and_login_path() {
        let store = Arc::new(MemorySessionStore::new());
        let navigator = Arc::new(RecordingNavigator::at("/dash"));
        let guard = AuthGuard::new(store, navigator.clone())
            .with_public_paths(["/open/"])
            .with_login_path("/signin");

        assert!(guard.requires_auth("/auth/login"));
        assert!(!guard.requires_auth("/open/health"));

        guard.handle_auth_failure();
        assert_eq!(navigator.visited(), vec!["/signin?redirect=%2Fdash"]);
    }

    #[test]
    fn test_end_does_not_touch_latch() {
        let (guard, store, _) = guard_at("/");
        guard.end();
        assert!(!store.get().is_authenticated());
        assert!(!guard.redirect_issued());
    }
}
