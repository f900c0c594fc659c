//! # Session Store
//!
//! In-memory map of browser sessions. Nothing is persisted; idle sessions are
//! swept after a TTL.

use chrono::Utc;
use dashmap::DashMap;
use log::{debug, info};
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::state::SessionState;
use crate::features::debate::Turn;

pub type SessionId = Uuid;

/// How often the sweeper looks for expired sessions
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<SessionId, SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an existing session or create a fresh one.
    ///
    /// Returns the id in use and whether it was newly created.
    pub fn get_or_create(&self, requested: Option<SessionId>) -> (SessionId, bool) {
        if let Some(id) = requested {
            if let Some(mut state) = self.sessions.get_mut(&id) {
                state.touch();
                return (id, false);
            }
        }

        let id = Uuid::new_v4();
        self.sessions.insert(id, SessionState::new());
        debug!("Created session {}", id);
        (id, true)
    }

    /// Run `f` against a session's state while holding its entry lock.
    ///
    /// `f` must not await; the lock is held for its whole duration.
    pub fn with_session<R, F>(&self, id: SessionId, f: F) -> Option<R>
    where
        F: FnOnce(&mut SessionState) -> R,
    {
        self.sessions.get_mut(&id).map(|mut state| {
            state.touch();
            f(state.value_mut())
        })
    }

    /// Clone of a session's current state
    pub fn snapshot(&self, id: SessionId) -> Option<SessionState> {
        self.sessions.get(&id).map(|s| s.clone())
    }

    /// Append a turn for the run identified by `epoch`.
    ///
    /// A missing session counts as stale and stops the run.
    pub fn record_turn(&self, id: SessionId, epoch: u64, turn: &Turn) -> ControlFlow<()> {
        self.with_session(id, |state| state.record_turn(epoch, turn))
            .unwrap_or(ControlFlow::Break(()))
    }

    /// Remove sessions idle for longer than `ttl`. Returns how many were removed.
    pub fn sweep_expired(&self, ttl: Duration) -> usize {
        let ttl = match chrono::Duration::from_std(ttl) {
            Ok(ttl) => ttl,
            Err(_) => return 0,
        };
        let cutoff = Utc::now() - ttl;

        let before = self.sessions.len();
        self.sessions.retain(|_, state| state.last_seen >= cutoff);
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Periodically drop idle sessions for the lifetime of the process
pub fn spawn_session_sweeper(store: SessionStore, ttl: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = store.sweep_expired(ttl);
            if removed > 0 {
                info!(
                    "Swept {} idle session(s), {} remaining",
                    removed,
                    store.len()
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::session::DEFAULT_TOPIC;

    #[test]
    fn test_get_or_create_reuses_known_id() {
        let store = SessionStore::new();
        let (id, created) = store.get_or_create(None);
        assert!(created);

        let (same, created) = store.get_or_create(Some(id));
        assert_eq!(same, id);
        assert!(!created);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_id_gets_fresh_session() {
        let store = SessionStore::new();
        let stale = Uuid::new_v4();
        let (id, created) = store.get_or_create(Some(stale));
        assert!(created);
        assert_ne!(id, stale);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let (a, _) = store.get_or_create(None);
        let (b, _) = store.get_or_create(None);

        store.with_session(a, |s| s.apply_topic("Topic A"));
        assert_eq!(store.snapshot(a).unwrap().topic, "Topic A");
        assert_eq!(store.snapshot(b).unwrap().topic, DEFAULT_TOPIC);
    }

    #[test]
    fn test_with_missing_session() {
        let store = SessionStore::new();
        assert!(store.with_session(Uuid::new_v4(), |_| ()).is_none());
    }

    #[test]
    fn test_sweep_removes_idle_sessions() {
        let store = SessionStore::new();
        let (old, _) = store.get_or_create(None);
        let (fresh, _) = store.get_or_create(None);

        store
            .sessions
            .get_mut(&old)
            .unwrap()
            .last_seen = Utc::now() - chrono::Duration::minutes(120);

        let removed = store.sweep_expired(Duration::from_secs(3600));
        assert_eq!(removed, 1);
        assert!(store.snapshot(old).is_none());
        assert!(store.snapshot(fresh).is_some());
    }
}
