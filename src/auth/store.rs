//
//  storedesk
//  auth/store.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! File-backed and in-memory session storage.
//!
//! Both stores keep the same two keys as the keyring store, so a session looks
//! the same whichever backend holds it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    parse_profile, KeyringSessionStore, Session, SessionStore, TOKEN_KEY, USER_INFO_KEY,
};
use crate::config::SessionBackend;

/// Session storage in a JSON file.
///
/// The file holds a flat object keyed by [`TOKEN_KEY`] and [`USER_INFO_KEY`].
/// On Unix it is written with owner-only permissions.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default location in the data directory.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(crate::config::Config::data_dir()?.join("session.json")))
    }

    /// Where the session file lives.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, Value> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), "failed to read session file: {}", e);
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), "ignoring corrupt session file: {}", e);
            BTreeMap::new()
        })
    }

    fn save(&self, entries: &BTreeMap<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(entries)?)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Session {
        let entries = self.load();
        Session {
            token: entries
                .get(TOKEN_KEY)
                .and_then(Value::as_str)
                .map(str::to_string),
            user_profile: entries.get(USER_INFO_KEY).and_then(|v| match v {
                Value::String(raw) => parse_profile(raw),
                Value::Null => None,
                other => Some(other.clone()),
            }),
        }
    }

    fn set(&self, token: &str, profile: Option<&Value>) -> Result<()> {
        let mut entries = self.load();
        entries.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        match profile {
            Some(profile) => {
                entries.insert(USER_INFO_KEY.to_string(), profile.clone());
            }
            None => {
                entries.remove(USER_INFO_KEY);
            }
        }
        self.save(&entries)
    }

    fn clear(&self) {
        let mut entries = self.load();
        entries.remove(TOKEN_KEY);
        entries.remove(USER_INFO_KEY);

        let result = if entries.is_empty() {
            match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            }
        } else {
            self.save(&entries)
        };

        if let Err(e) = result {
            warn!(path = %self.path.display(), "failed to clear session file: {}", e);
        }
    }
}

/// Process-local session storage.
///
/// Used by tests and by `--ephemeral` runs, where nothing should outlive the
/// process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store
            .entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(TOKEN_KEY.to_string(), token.into());
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Session {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Session {
            token: entries.get(TOKEN_KEY).cloned(),
            user_profile: entries
                .get(USER_INFO_KEY)
                .and_then(|raw| parse_profile(raw)),
        }
    }

    fn set(&self, token: &str, profile: Option<&Value>) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        match profile {
            Some(profile) => {
                entries.insert(USER_INFO_KEY.to_string(), profile.to_string());
            }
            None => {
                entries.remove(USER_INFO_KEY);
            }
        }
        Ok(())
    }

    fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(TOKEN_KEY);
        entries.remove(USER_INFO_KEY);
    }
}

/// Opens the session store selected by `backend`.
pub fn open_session_store(backend: SessionBackend) -> Result<Arc<dyn SessionStore>> {
    debug!(%backend, "opening session store");
    Ok(match backend {
        SessionBackend::Keyring => Arc::new(KeyringSessionStore::new()),
        SessionBackend::File => Arc::new(FileSessionStore::default_location()?),
        SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
    })
}
