// ABOUTME: Local credential cache - the durable artifacts a live session leaves behind
// ABOUTME: CredentialStore trait plus the JSON-file implementation under ~/.opsdesk

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{SessionError, SessionResult};

/// Cached session artifacts. The cached endpoint and last-validation
/// timestamp are optimizations, not contracts; the token is the only
/// artifact whose absence means "no local session".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionCache {
    token: Option<String>,
    last_validation: Option<DateTime<Utc>>,
    endpoint: Option<String>,
}

/// Access to locally stored authentication artifacts.
///
/// `clear_all` is the logout hammer: it must remove every artifact so a
/// stale session cannot silently resurface on the next launch.
pub trait CredentialStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn has_credentials(&self) -> bool {
        self.token().is_some()
    }
    fn last_validation(&self) -> Option<DateTime<Utc>>;
    fn record_validation(&self, at: DateTime<Utc>);
    fn cached_endpoint(&self) -> Option<String>;
    fn set_cached_endpoint(&self, url: &str);
    fn clear_all(&self) -> SessionResult<()>;
}

/// JSON-file credential store, one file per user under `~/.opsdesk`.
pub struct FileCredentialStore {
    path: PathBuf,
    cache: Mutex<SessionCache>,
}

impl FileCredentialStore {
    pub fn open_default() -> SessionResult<Self> {
        let dir = dirs::home_dir()
            .ok_or_else(|| SessionError::NoHomeDirectory)?
            .join(".opsdesk");
        Self::open(dir.join("session.json"))
    }

    pub fn open(path: impl Into<PathBuf>) -> SessionResult<Self> {
        let path = path.into();
        let cache = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "corrupt session cache; starting fresh");
                SessionCache::default()
            }),
            Err(_) => SessionCache::default(),
        };

        Ok(FileCredentialStore {
            path,
            cache: Mutex::new(cache),
        })
    }

    pub fn store_token(&self, token: &str) -> SessionResult<()> {
        let mut cache = self.cache.lock().unwrap();
        cache.token = Some(token.to_string());
        Self::persist(&self.path, &cache)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(path: &Path, cache: &SessionCache) -> SessionResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(cache)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn token(&self) -> Option<String> {
        self.cache.lock().unwrap().token.clone()
    }

    fn last_validation(&self) -> Option<DateTime<Utc>> {
        self.cache.lock().unwrap().last_validation
    }

    fn record_validation(&self, at: DateTime<Utc>) {
        let mut cache = self.cache.lock().unwrap();
        cache.last_validation = Some(at);
        if let Err(e) = Self::persist(&self.path, &cache) {
            warn!(error = %e, "failed to persist validation timestamp");
        }
    }

    fn cached_endpoint(&self) -> Option<String> {
        self.cache.lock().unwrap().endpoint.clone()
    }

    fn set_cached_endpoint(&self, url: &str) {
        let mut cache = self.cache.lock().unwrap();
        cache.endpoint = Some(url.to_string());
        if let Err(e) = Self::persist(&self.path, &cache) {
            warn!(error = %e, "failed to persist endpoint cache");
        }
    }

    fn clear_all(&self) -> SessionResult<()> {
        let mut cache = self.cache.lock().unwrap();
        *cache = SessionCache::default();
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileCredentialStore::open(&path).unwrap();
        assert!(!store.has_credentials());

        store.store_token("tok-abc").unwrap();
        store.set_cached_endpoint("https://api.example.com");
        store.record_validation(Utc::now());

        // A fresh handle sees the persisted artifacts.
        let reopened = FileCredentialStore::open(&path).unwrap();
        assert_eq!(reopened.token().as_deref(), Some("tok-abc"));
        assert_eq!(
            reopened.cached_endpoint().as_deref(),
            Some("https://api.example.com")
        );
        assert!(reopened.last_validation().is_some());

        reopened.clear_all().unwrap();
        assert!(!reopened.has_credentials());
        assert!(!path.exists());
        // Clearing twice is fine.
        reopened.clear_all().unwrap();
    }

    #[test]
    fn test_corrupt_cache_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileCredentialStore::open(&path).unwrap();
        assert!(!store.has_credentials());
    }
}
