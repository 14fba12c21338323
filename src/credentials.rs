//! API credential storage.
//!
//! The crate never interprets the token: curation only checks that one is
//! present and hands it to the generator unchanged.

use std::sync::RwLock;
use std::time::{Duration, Instant};

/// How long a stored key stays valid by default (30 days).
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Environment variable read by [`EnvCredentialStore::default`].
pub const DEFAULT_ENV_VAR: &str = "OPENROUTER_API_KEY";

/// Storage for the generation API token.
pub trait CredentialStore: Send + Sync {
    /// The current token, if one is set and still valid.
    fn get(&self) -> Option<String>;

    /// Store a token, replacing any previous one.
    fn set(&self, token: &str);

    /// Forget the stored token.
    fn remove(&self);

    /// Is a token available?
    fn is_present(&self) -> bool {
        self.get().is_some()
    }
}

#[derive(Debug)]
struct StoredToken {
    token: String,
    expires_at: Option<Instant>,
}

/// In-process store with an optional time-to-live.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: RwLock<Option<StoredToken>>,
    ttl: Option<Duration>,
}

impl MemoryCredentialStore {
    /// Store without expiry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose tokens expire `ttl` after being set.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl: Some(ttl),
        }
    }

    /// Store pre-loaded with `token`.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.set(token);
        store
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<String> {
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        slot.as_ref()
            .filter(|stored| stored.expires_at.map_or(true, |at| Instant::now() < at))
            .map(|stored| stored.token.clone())
    }

    fn set(&self, token: &str) {
        let token = token.trim();
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = (!token.is_empty()).then(|| StoredToken {
            token: token.to_string(),
            expires_at: self.ttl.map(|ttl| Instant::now() + ttl),
        });
    }

    fn remove(&self) {
        *self.slot.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

/// Reads the token from an environment variable.
///
/// `set` and `remove` act on an in-memory overlay; the process
/// environment itself is never modified.
#[derive(Debug)]
pub struct EnvCredentialStore {
    var: String,
    overlay: MemoryCredentialStore,
    removed: RwLock<bool>,
}

impl EnvCredentialStore {
    #[must_use]
    pub fn new(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            overlay: MemoryCredentialStore::new(),
            removed: RwLock::new(false),
        }
    }
}

impl Default for EnvCredentialStore {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_VAR)
    }
}

impl CredentialStore for EnvCredentialStore {
    fn get(&self) -> Option<String> {
        if let Some(token) = self.overlay.get() {
            return Some(token);
        }
        if *self.removed.read().unwrap_or_else(|e| e.into_inner()) {
            return None;
        }
        std::env::var(&self.var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn set(&self, token: &str) {
        self.overlay.set(token);
    }

    fn remove(&self) {
        self.overlay.remove();
        *self.removed.write().unwrap_or_else(|e| e.into_inner()) = true;
    }
}
