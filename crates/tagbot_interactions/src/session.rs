//! Per-user pagination session state.
//!
//! The outer map is guarded by a short-held `RwLock`; each session sits behind
//! its own `Mutex` so stepping one user's pages never blocks another's. No
//! lock is held across an `.await`.

use crate::{PageAction, PageView};
use derive_getters::Getters;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tagbot_core::UserId;
use tagbot_error::{InteractionError, InteractionErrorKind, TagbotResult};
use tracing::{debug, instrument, warn};

/// Which paginated view a session belongs to; the button namespace.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct SessionKind(String);

impl SessionKind {
    /// Create a kind.
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    /// Borrow the kind name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

/// Store key: one session per owner per kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{}:{}", kind, owner)]
pub struct SessionKey {
    /// User the session belongs to
    pub owner: UserId,
    /// Session kind
    pub kind: SessionKind,
}

impl SessionKey {
    /// Create a key.
    pub fn new(owner: UserId, kind: impl Into<SessionKind>) -> Self {
        Self {
            owner,
            kind: kind.into(),
        }
    }
}

/// Rendered pages and the current position.
///
/// Always holds at least one page and `index < pages.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationSession {
    pages: Vec<Vec<String>>,
    index: usize,
}

impl PaginationSession {
    /// Create a session at the first page. `None` when `pages` is empty.
    pub fn new(pages: Vec<Vec<String>>) -> Option<Self> {
        if pages.is_empty() {
            return None;
        }
        Some(Self { pages, index: 0 })
    }

    /// Current page index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Step to another page.
    pub fn apply(&mut self, action: PageAction) -> usize {
        self.index = action.apply(self.index, self.pages.len());
        self.index
    }

    /// Snapshot of the current page.
    pub fn view(&self, key: &SessionKey) -> PageView {
        let page_count = self.pages.len();
        let first_ordinal = self.pages[..self.index].iter().map(Vec::len).sum::<usize>() + 1;
        PageView {
            kind: key.kind.clone(),
            owner: key.owner,
            index: self.index,
            page_count,
            rows: self.pages[self.index].clone(),
            first_ordinal,
            total_items: self.pages.iter().map(Vec::len).sum(),
            previous_disabled: self.index == 0,
            next_disabled: self.index + 1 == page_count,
        }
    }
}

/// Session retention settings.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct SessionStoreConfig {
    /// Seconds since last use before a session expires
    #[serde(default = "default_ttl_secs")]
    ttl_secs: u64,

    /// Sessions kept before the least recently used one is evicted
    #[serde(default = "default_max_sessions")]
    max_sessions: usize,
}

fn default_ttl_secs() -> u64 {
    900 // interaction token lifetime
}

fn default_max_sessions() -> usize {
    10_000
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

#[derive(Debug)]
struct SessionEntry {
    session: PaginationSession,
    touched: Instant,
}

impl SessionEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.touched.elapsed() >= ttl
    }
}

/// Keyed pagination sessions shared by every event task.
///
/// # Example
///
/// ```
/// use tagbot_core::UserId;
/// use tagbot_interactions::{PageAction, SessionKey, SessionStore};
///
/// let store = SessionStore::default();
/// let key = SessionKey::new(UserId::new(42), "list_subcommand_button");
///
/// let view = store.open(key.clone(), vec![vec!["a".into()], vec!["b".into()]]).unwrap();
/// assert_eq!(view.index, 0);
///
/// let view = store.apply(&key, PageAction::Next).unwrap();
/// assert_eq!(view.rows, vec!["b".to_string()]);
/// ```
#[derive(Debug)]
pub struct SessionStore {
    config: SessionStoreConfig,
    sessions: RwLock<HashMap<SessionKey, Arc<Mutex<SessionEntry>>>>,
}

impl SessionStore {
    /// Create a store.
    pub fn new(config: SessionStoreConfig) -> Self {
        debug!(
            ttl_secs = config.ttl_secs,
            max_sessions = config.max_sessions,
            "Creating new SessionStore"
        );
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Retention settings.
    pub fn config(&self) -> &SessionStoreConfig {
        &self.config
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(self.config.ttl_secs)
    }

    /// Start or replace the session under `key` and return its first page.
    ///
    /// # Errors
    ///
    /// Returns an error when `pages` is empty; no session is stored.
    #[instrument(skip(self, pages), fields(key = %key, pages = pages.len()))]
    pub fn open(&self, key: SessionKey, pages: Vec<Vec<String>>) -> TagbotResult<PageView> {
        let session = PaginationSession::new(pages).ok_or_else(|| {
            InteractionError::new(InteractionErrorKind::EmptySession(key.kind.to_string()))
        })?;
        let view = session.view(&key);
        self.insert(key, session);
        Ok(view)
    }

    /// Store a session, replacing any existing one under `key`.
    pub fn insert(&self, key: SessionKey, session: PaginationSession) {
        let entry = Arc::new(Mutex::new(SessionEntry {
            session,
            touched: Instant::now(),
        }));

        let mut sessions = self.sessions.write();
        if !sessions.contains_key(&key) && sessions.len() >= self.config.max_sessions {
            let ttl = self.ttl();
            sessions.retain(|_, existing| !existing.lock().is_expired(ttl));
            if sessions.len() >= self.config.max_sessions {
                Self::evict_lru(&mut sessions);
            }
        }
        debug!(key = %key, replaced = sessions.contains_key(&key), "Stored pagination session");
        sessions.insert(key, entry);
    }

    /// Current page of the session under `key`, if it exists and has not expired.
    pub fn view(&self, key: &SessionKey) -> Option<PageView> {
        self.with_session(key, |session| session.view(key))
    }

    /// Apply a navigation action and return the new page.
    ///
    /// `None` when there is no live session under `key`.
    pub fn apply(&self, key: &SessionKey, action: PageAction) -> Option<PageView> {
        self.with_session(key, |session| {
            session.apply(action);
            session.view(key)
        })
    }

    fn with_session<T>(
        &self,
        key: &SessionKey,
        f: impl FnOnce(&mut PaginationSession) -> T,
    ) -> Option<T> {
        let entry = self.sessions.read().get(key).cloned()?;

        let mut guard = entry.lock();
        if guard.is_expired(self.ttl()) {
            drop(guard);
            debug!(key = %key, "Pagination session expired");
            self.remove_entry(key, &entry);
            return None;
        }
        guard.touched = Instant::now();
        Some(f(&mut guard.session))
    }

    // Only removes `entry` if it has not been replaced in the meantime.
    fn remove_entry(&self, key: &SessionKey, entry: &Arc<Mutex<SessionEntry>>) {
        let mut sessions = self.sessions.write();
        if sessions
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, entry))
        {
            sessions.remove(key);
        }
    }

    /// Drop the session under `key`. Returns whether one existed.
    pub fn remove(&self, key: &SessionKey) -> bool {
        self.sessions.write().remove(key).is_some()
    }

    /// Drop every expired session and return how many were removed.
    pub fn purge_expired(&self) -> usize {
        let ttl = self.ttl();
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.lock().is_expired(ttl));
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::info!(removed, remaining = sessions.len(), "Purged expired pagination sessions");
        }
        removed
    }

    /// Number of stored sessions, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// True when no sessions are stored.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    fn evict_lru(sessions: &mut HashMap<SessionKey, Arc<Mutex<SessionEntry>>>) {
        let oldest = sessions
            .iter()
            .min_by_key(|(_, entry)| entry.lock().touched)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            warn!(key = %key, "Session store at capacity, evicting least recently used session");
            sessions.remove(&key);
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionStoreConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(sizes: &[usize]) -> Vec<Vec<String>> {
        let mut n = 0;
        sizes
            .iter()
            .map(|&size| {
                (0..size)
                    .map(|_| {
                        n += 1;
                        format!("row {}", n)
                    })
                    .collect()
            })
            .collect()
    }

    fn key(owner: u64) -> SessionKey {
        SessionKey::new(UserId::new(owner), "list_subcommand_button")
    }

    #[test]
    fn test_empty_pages_rejected() {
        let store = SessionStore::default();
        assert!(store.open(key(1), Vec::new()).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_view_reports_ordinals_and_totals() {
        let store = SessionStore::default();
        store.open(key(1), pages(&[10, 10, 3])).unwrap();

        let view = store.apply(&key(1), PageAction::Previous).unwrap();
        assert_eq!(view.index, 2);
        assert_eq!(view.first_ordinal, 21);
        assert_eq!(view.total_items, 23);
        assert!(view.next_disabled);
        assert!(!view.previous_disabled);
    }

    #[test]
    fn test_reopen_replaces_session() {
        let store = SessionStore::default();
        store.open(key(1), pages(&[1, 1])).unwrap();
        store.apply(&key(1), PageAction::Next).unwrap();

        let view = store.open(key(1), pages(&[1, 1, 1])).unwrap();
        assert_eq!(view.index, 0);
        assert_eq!(view.page_count, 3);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let store = SessionStore::new(SessionStoreConfig::default().with_ttl_secs(0));
        store.open(key(1), pages(&[1])).unwrap();

        assert!(store.apply(&key(1), PageAction::Next).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let store = SessionStore::new(SessionStoreConfig::default().with_ttl_secs(0));
        store.open(key(1), pages(&[1])).unwrap();
        store.open(key(2), pages(&[1])).unwrap();

        assert_eq!(store.purge_expired(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_capacity_evicts_least_recently_used() {
        let store = SessionStore::new(SessionStoreConfig::default().with_max_sessions(2));
        store.open(key(1), pages(&[1])).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        store.open(key(2), pages(&[1])).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        store.view(&key(1)).unwrap();
        std::thread::sleep(Duration::from_millis(5));

        store.open(key(3), pages(&[1])).unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.view(&key(1)).is_some());
        assert!(store.view(&key(2)).is_none());
        assert!(store.view(&key(3)).is_some());
    }
}
