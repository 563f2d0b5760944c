// src/services/session_store.rs
// DOCUMENTATION: Per-client map sessions
// PURPOSE: Keep each HTTP client's predictions and autocomplete token apart

use crate::services::MapSession;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Session entry with expiration
struct SessionEntry {
    session: Arc<MapSession>,
    expires_at: Instant,
}

impl SessionEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now > self.expires_at
    }
}

/// Client sessions keyed by client-supplied session id
/// DOCUMENTATION: Sliding TTL, bounded size. When full, expired entries are
/// dropped first, then the one closest to expiry.
pub struct SessionStore {
    store: RwLock<HashMap<String, SessionEntry>>,
    ttl: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(ttl_seconds: u64, max_sessions: usize) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            ttl: Duration::from_secs(ttl_seconds),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Session for `id`, created if missing or expired; refreshes its TTL
    pub async fn get_or_create(&self, id: &str) -> Arc<MapSession> {
        let now = Instant::now();
        let mut store = self.store.write().await;

        if let Some(entry) = store.get_mut(id) {
            if !entry.is_expired(now) {
                entry.expires_at = now + self.ttl;
                return entry.session.clone();
            }
        }

        if !store.contains_key(id) && store.len() >= self.max_sessions {
            store.retain(|_, entry| !entry.is_expired(now));

            if store.len() >= self.max_sessions {
                let oldest = store
                    .iter()
                    .min_by_key(|(_, entry)| entry.expires_at)
                    .map(|(key, _)| key.clone());
                if let Some(key) = oldest {
                    store.remove(&key);
                    log::debug!("Session store full, evicted session {}", key);
                }
            }
        }

        let session = Arc::new(MapSession::new());
        store.insert(
            id.to_string(),
            SessionEntry {
                session: session.clone(),
                expires_at: now + self.ttl,
            },
        );
        session
    }

    /// Live session for `id`, if any
    pub async fn get(&self, id: &str) -> Option<Arc<MapSession>> {
        let store = self.store.read().await;
        store
            .get(id)
            .filter(|entry| !entry.is_expired(Instant::now()))
            .map(|entry| entry.session.clone())
    }

    /// Clear expired entries
    pub async fn cleanup(&self) {
        let now = Instant::now();
        let mut store = self.store.write().await;
        let before_count = store.len();
        store.retain(|_, entry| !entry.is_expired(now));
        let after_count = store.len();

        if before_count > after_count {
            log::info!(
                "Session cleanup: removed {} expired sessions ({} remaining)",
                before_count - after_count,
                after_count
            );
        }
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}

/// Start background cleanup task
/// DOCUMENTATION: Periodically removes expired sessions
pub fn start_cleanup_task(sessions: Arc<SessionStore>, interval_seconds: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds));

        loop {
            interval.tick().await;
            sessions.cleanup().await;
        }
    });
}
