//! Session check-in state
//!
//! A completed check-in stores the overwhelm score with a timestamp and
//! stays fresh for a TTL (12 hours by default); after that a new
//! check-in is required. Skipping a check-in suppresses the prompt for
//! the same TTL without storing a value.
//!
//! The store is an injected seam rather than a global singleton, so
//! tests run against [`MemoryStore`] and the CLI against [`FileStore`].
//! Store failures are swallowed: the manager degrades to "no session",
//! which keeps the check-in prompt available instead of surfacing a
//! storage fault.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::{OverwhelmPersistence, SidekickConfig};
use crate::error::{Result, SidekickError};
use crate::support::{SupportLevel, clamp_overwhelm, map_to_support_level, snap_overwhelm};

const SESSION_KEY: &str = "sidekick.session.state";
const SKIP_KEY: &str = "sidekick.session.skipped_at";

/// A stored check-in result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SessionState {
    pub overwhelm: u8,
    pub set_at: DateTime<Utc>,
}

impl SessionState {
    pub fn support_level(&self) -> SupportLevel {
        map_to_support_level(self.overwhelm as f64)
    }
}

/// Time source, injectable for TTL tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Durable key-value persistence for session state. Implementations are
/// synchronous; the manager serializes read-modify-write sequences.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store used in tests and as a non-durable fallback.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// JSON-file-backed store used by the CLI.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write of the backing file
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_map(&self, key: &str) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|cause| SidekickError::store_read(key, cause))?;
        serde_json::from_str(&raw).map_err(|cause| SidekickError::store_read(key, cause))
    }

    fn write_map(&self, key: &str, map: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|cause| SidekickError::store_write(key, cause))?;
        }
        let raw = serde_json::to_string_pretty(map)
            .map_err(|cause| SidekickError::store_write(key, cause))?;
        std::fs::write(&self.path, raw).map_err(|cause| SidekickError::store_write(key, cause))
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_map(key)?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut map = self.read_map(key)?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(key, &map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut map = self.read_map(key)?;
        if map.remove(key).is_some() {
            self.write_map(key, &map)?;
        }
        Ok(())
    }
}

/// Owns check-in freshness: stored value, skip marker, and the TTL.
pub struct SessionManager<S: SessionStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    ttl: Duration,
    persistence: OverwhelmPersistence,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: S, config: &SidekickConfig) -> Self {
        Self::with_clock(store, SystemClock, config)
    }
}

impl<S: SessionStore, C: Clock> SessionManager<S, C> {
    pub fn with_clock(store: S, clock: C, config: &SidekickConfig) -> Self {
        Self {
            store,
            clock,
            ttl: config.session_ttl(),
            persistence: config.overwhelm_persistence,
        }
    }

    /// Store a completed check-in. The value is clamped, then either
    /// stored exactly or snapped to steps of 25 per the configured
    /// persistence policy. Clears any prior skip marker.
    pub fn set_overwhelm(&self, value: f64) -> SessionState {
        let overwhelm = match self.persistence {
            OverwhelmPersistence::Exact => clamp_overwhelm(value),
            OverwhelmPersistence::SnappedTo25 => snap_overwhelm(value),
        };
        let state = SessionState {
            overwhelm,
            set_at: self.clock.now(),
        };
        match serde_json::to_string(&state) {
            Ok(raw) => {
                if let Err(error) = self.store.set(SESSION_KEY, &raw) {
                    tracing::warn!(%error, "failed to persist check-in; continuing without");
                }
            }
            Err(error) => {
                tracing::warn!(%error, "failed to serialize session state");
            }
        }
        if let Err(error) = self.store.remove(SKIP_KEY) {
            tracing::warn!(%error, "failed to clear skip marker");
        }
        state
    }

    /// Suppress the check-in prompt for one TTL without storing a value.
    /// A previously stored overwhelm value is left untouched.
    pub fn skip_check_in(&self) -> DateTime<Utc> {
        let now = self.clock.now();
        if let Err(error) = self.store.set(SKIP_KEY, &now.to_rfc3339()) {
            tracing::warn!(%error, "failed to persist skip marker");
        }
        now
    }

    /// The stored check-in, if present and well-formed. Freshness is not
    /// checked here; combine with [`is_check_in_required`].
    ///
    /// [`is_check_in_required`]: Self::is_check_in_required
    pub fn session(&self) -> Option<SessionState> {
        match self.store.get(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(state) => Some(state),
                Err(error) => {
                    tracing::debug!(%error, "stored session state is malformed");
                    None
                }
            },
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(%error, "session store read failed; treating as no session");
                None
            }
        }
    }

    /// True unless a fresh check-in or a fresh skip marker exists.
    pub fn is_check_in_required(&self) -> bool {
        if let Some(state) = self.session() {
            if self.is_fresh(state.set_at) {
                return false;
            }
        }
        match self.store.get(SKIP_KEY) {
            Ok(Some(raw)) => {
                if let Ok(skipped_at) = DateTime::parse_from_rfc3339(&raw) {
                    if self.is_fresh(skipped_at.with_timezone(&Utc)) {
                        return false;
                    }
                }
            }
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(%error, "skip marker read failed; requiring check-in");
            }
        }
        true
    }

    /// Remove the stored check-in value. The skip marker is untouched,
    /// matching the app's clear semantics.
    pub fn clear_session(&self) {
        if let Err(error) = self.store.remove(SESSION_KEY) {
            tracing::warn!(%error, "failed to clear session state");
        }
    }

    fn is_fresh(&self, at: DateTime<Utc>) -> bool {
        self.clock.now() - at < self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[derive(Clone)]
    struct FakeClock {
        now: Arc<Mutex<DateTime<Utc>>>,
    }

    impl FakeClock {
        fn new() -> Self {
            Self {
                now: Arc::new(Mutex::new(Utc::now())),
            }
        }

        fn advance(&self, duration: Duration) {
            let mut now = self.now.lock();
            *now += duration;
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock()
        }
    }

    /// Store whose operations always fail, for degradation tests.
    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Err(SidekickError::store_read(
                key,
                std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"),
            ))
        }

        fn set(&self, key: &str, _value: &str) -> Result<()> {
            Err(SidekickError::store_write(
                key,
                std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"),
            ))
        }

        fn remove(&self, key: &str) -> Result<()> {
            Err(SidekickError::store_write(
                key,
                std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"),
            ))
        }
    }

    fn manager_with_clock() -> (SessionManager<MemoryStore, FakeClock>, FakeClock) {
        let clock = FakeClock::new();
        let manager =
            SessionManager::with_clock(MemoryStore::new(), clock.clone(), &SidekickConfig::default());
        (manager, clock)
    }

    #[test]
    fn check_in_is_required_when_nothing_is_stored() {
        let (manager, _clock) = manager_with_clock();
        assert!(manager.is_check_in_required());
        assert_eq!(manager.session(), None);
    }

    #[test]
    fn fresh_check_in_suppresses_the_prompt_until_ttl() {
        let (manager, clock) = manager_with_clock();
        manager.set_overwhelm(60.0);
        assert!(!manager.is_check_in_required());

        clock.advance(Duration::hours(11));
        assert!(!manager.is_check_in_required());

        // Exactly at the TTL the session is stale
        clock.advance(Duration::hours(1));
        assert!(manager.is_check_in_required());
        // The stale value is still readable; freshness is the caller's call
        assert_eq!(manager.session().map(|s| s.overwhelm), Some(60));
    }

    #[test]
    fn skip_suppresses_prompt_without_storing_a_value() {
        let (manager, clock) = manager_with_clock();
        manager.skip_check_in();
        assert!(!manager.is_check_in_required());
        assert_eq!(manager.session(), None);

        clock.advance(Duration::hours(13));
        assert!(manager.is_check_in_required());
    }

    #[test]
    fn skip_leaves_a_prior_value_in_place() {
        let (manager, _clock) = manager_with_clock();
        manager.set_overwhelm(40.0);
        manager.skip_check_in();
        assert_eq!(manager.session().map(|s| s.overwhelm), Some(40));
    }

    #[test]
    fn set_overwhelm_clears_the_skip_marker() {
        let (manager, _clock) = manager_with_clock();
        manager.skip_check_in();
        manager.set_overwhelm(30.0);
        manager.clear_session();
        // With the skip marker cleared by set_overwhelm, clearing the
        // session requires a new check-in immediately
        assert!(manager.is_check_in_required());
    }

    #[test]
    fn exact_policy_stores_the_exact_value() {
        let (manager, _clock) = manager_with_clock();
        let state = manager.set_overwhelm(63.0);
        assert_eq!(state.overwhelm, 63);
        assert_eq!(manager.session().map(|s| s.overwhelm), Some(63));
    }

    #[test]
    fn snapped_policy_stores_multiples_of_25() {
        let clock = FakeClock::new();
        let config = SidekickConfig {
            overwhelm_persistence: OverwhelmPersistence::SnappedTo25,
            ..SidekickConfig::default()
        };
        let manager = SessionManager::with_clock(MemoryStore::new(), clock, &config);
        assert_eq!(manager.set_overwhelm(63.0).overwhelm, 75);
        assert_eq!(manager.set_overwhelm(12.0).overwhelm, 0);
    }

    #[test]
    fn out_of_range_values_are_clamped_before_storing() {
        let (manager, _clock) = manager_with_clock();
        assert_eq!(manager.set_overwhelm(180.0).overwhelm, 100);
        assert_eq!(manager.set_overwhelm(-4.0).overwhelm, 0);
        assert_eq!(manager.set_overwhelm(f64::NAN).overwhelm, 50);
    }

    #[test]
    fn store_failures_degrade_to_no_session() {
        let manager = SessionManager::new(BrokenStore, &SidekickConfig::default());
        manager.set_overwhelm(60.0);
        manager.skip_check_in();
        assert_eq!(manager.session(), None);
        assert!(manager.is_check_in_required());
    }

    #[test]
    fn session_state_exposes_its_support_level() {
        let (manager, _clock) = manager_with_clock();
        let state = manager.set_overwhelm(80.0);
        assert_eq!(state.support_level(), SupportLevel::Overloaded);
    }

    #[test]
    fn file_store_round_trips_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let clock = FakeClock::new();
        let manager = SessionManager::with_clock(
            FileStore::new(path.clone()),
            clock.clone(),
            &SidekickConfig::default(),
        );
        manager.set_overwhelm(55.0);

        // A second manager over the same file sees the stored session
        let reopened =
            SessionManager::with_clock(FileStore::new(path), clock, &SidekickConfig::default());
        assert_eq!(reopened.session().map(|s| s.overwhelm), Some(55));
        assert!(!reopened.is_check_in_required());
    }
}
