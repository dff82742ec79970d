//
//  storedesk
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Keyring Session Storage
//!
//! Keeps the session in the system's native keyring:
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! Two entries are used under the `storedesk` service: one for the token and
//! one for the serialized profile. When the keyring cannot be reached (headless
//! hosts, containers) reads come back empty; use
//! [`FileSessionStore`](super::FileSessionStore) there instead.

use anyhow::Result;
use keyring::Entry;
use serde_json::Value;
use tracing::warn;

use super::{parse_profile, Session, SessionStore, TOKEN_KEY, USER_INFO_KEY};

/// The service name used to identify this application in the system keyring.
const SERVICE_NAME: &str = "storedesk";

/// Session storage backed by the system keyring.
///
/// # Example
///
/// ```rust,no_run
/// use storedesk::auth::{KeyringSessionStore, SessionStore};
///
/// let store = KeyringSessionStore::new();
/// store.set("token", None)?;
/// assert!(store.get().is_authenticated());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct KeyringSessionStore {
    /// The service name identifying this application in the keyring.
    service: String,
}

impl Default for KeyringSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringSessionStore {
    /// Creates a store using the default service name.
    ///
    /// No keyring access happens until a method is called.
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Creates a store under a custom service name.
    ///
    /// Useful for keeping sessions for several backends apart.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        let entry = match Entry::new(&self.service, key) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, "keyring unavailable: {}", e);
                return None;
            }
        };
        match entry.get_password() {
            Ok(value) => Some(value),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!(key, "failed to read keyring entry: {}", e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let entry = Entry::new(&self.service, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    fn remove(&self, key: &str) {
        let result = Entry::new(&self.service, key).and_then(|entry| entry.delete_credential());
        match result {
            Ok(()) | Err(keyring::Error::NoEntry) => {}
            Err(e) => warn!(key, "failed to delete keyring entry: {}", e),
        }
    }
}

impl SessionStore for KeyringSessionStore {
    fn get(&self) -> Session {
        Session {
            token: self.read(TOKEN_KEY),
            user_profile: self.read(USER_INFO_KEY).and_then(|raw| parse_profile(&raw)),
        }
    }

    fn set(&self, token: &str, profile: Option<&Value>) -> Result<()> {
        self.write(TOKEN_KEY, token)?;
        match profile {
            Some(profile) => self.write(USER_INFO_KEY, &profile.to_string())?,
            None => self.remove(USER_INFO_KEY),
        }
        Ok(())
    }

    fn clear(&self) {
        self.remove(TOKEN_KEY);
        self.remove(USER_INFO_KEY);
    }
}
