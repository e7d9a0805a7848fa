use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use digest_core::{DigestState, Topic};
use digest_logging::{digest_debug, digest_info};
use uuid::Uuid;

/// State of one browser session.
///
/// The async mutex is held for a whole interaction, webhook call included,
/// so a session never has two requests in flight.
pub type SessionHandle = Arc<tokio::sync::Mutex<DigestState>>;

struct SessionEntry {
    handle: SessionHandle,
    last_seen: Instant,
}

/// Session id → state. A session ends once it has been idle for `idle_ttl`.
#[derive(Clone)]
pub struct SessionRegistry {
    topics: Arc<Vec<Topic>>,
    idle_ttl: Duration,
    sessions: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
}

impl SessionRegistry {
    pub fn new(topics: Vec<Topic>, idle_ttl: Duration) -> Self {
        Self {
            topics: Arc::new(topics),
            idle_ttl,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the session for `id`, creating a fresh one when it is unknown
    /// or expired. The flag reports whether a new session id was issued.
    pub fn resolve(&self, id: Option<Uuid>) -> (Uuid, SessionHandle, bool) {
        self.resolve_at(id, Instant::now())
    }

    fn resolve_at(&self, id: Option<Uuid>, now: Instant) -> (Uuid, SessionHandle, bool) {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        self.evict_idle(&mut sessions, now);

        if let Some(id) = id {
            if let Some(entry) = sessions.get_mut(&id) {
                entry.last_seen = now;
                return (id, entry.handle.clone(), false);
            }
        }

        let id = Uuid::new_v4();
        let handle = Arc::new(tokio::sync::Mutex::new(DigestState::new(
            self.topics.as_ref().clone(),
        )));
        sessions.insert(
            id,
            SessionEntry {
                handle: handle.clone(),
                last_seen: now,
            },
        );
        digest_info!("Started session {} ({} active)", id, sessions.len());
        (id, handle, true)
    }

    // Sessions still referenced by an in-flight interaction are kept.
    fn evict_idle(&self, sessions: &mut HashMap<Uuid, SessionEntry>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, entry| {
            now.saturating_duration_since(entry.last_seen) < self.idle_ttl
                || Arc::strong_count(&entry.handle) > 1
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            digest_debug!("Evicted {} idle sessions ({} active)", evicted, sessions.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use digest_core::{update, Msg};

    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    fn registry() -> SessionRegistry {
        SessionRegistry::new(vec!["Alpha".to_string()], TTL)
    }

    fn active(registry: &SessionRegistry) -> usize {
        registry.sessions.lock().unwrap().len()
    }

    async fn press_alpha(handle: &SessionHandle) {
        let mut state = handle.lock().await;
        let (next, _) = update(std::mem::take(&mut *state), Msg::TopicPressed("Alpha".into()));
        let (next, _) = update(
            next,
            Msg::TopicFetched {
                topic: "Alpha".into(),
                raw: "[]".into(),
            },
        );
        *state = next;
    }

    #[test]
    fn unknown_or_missing_ids_create_sessions() {
        let registry = registry();
        let (first, _, created) = registry.resolve(None);
        assert!(created);
        let (second, _, created) = registry.resolve(Some(Uuid::new_v4()));
        assert!(created);
        assert_ne!(first, second);
        assert_eq!(active(&registry), 2);
    }

    #[test]
    fn known_ids_share_state() {
        let registry = registry();
        let (id, handle, _) = registry.resolve(None);
        let (again, other, created) = registry.resolve(Some(id));

        assert_eq!(id, again);
        assert!(!created);
        assert!(Arc::ptr_eq(&handle, &other));
        assert_eq!(active(&registry), 1);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let registry = registry();
        let (_, first, _) = registry.resolve(None);
        let (_, second, _) = registry.resolve(None);

        press_alpha(&first).await;

        assert!(first.lock().await.store().is_visible("Alpha"));
        assert!(!second.lock().await.store().is_visible("Alpha"));
    }

    #[tokio::test]
    async fn idle_sessions_are_evicted_and_live_ones_keep_their_cache() {
        let registry = registry();
        let start = Instant::now();

        let (live, handle, _) = registry.resolve_at(None, start);
        press_alpha(&handle).await;
        drop(handle);
        let (idle, idle_handle, _) = registry.resolve_at(None, start);
        drop(idle_handle);

        // Only the live session is seen again before the idle one expires.
        let (_, handle, created) = registry.resolve_at(Some(live), start + TTL / 2);
        assert!(!created);
        drop(handle);

        let (_, handle, created) = registry.resolve_at(Some(live), start + TTL + TTL / 4);
        assert!(!created);
        assert!(handle.lock().await.store().has_cached("Alpha"));
        assert_eq!(active(&registry), 1);

        let (reissued, _, created) = registry.resolve_at(Some(idle), start + TTL + TTL / 4);
        assert!(created);
        assert_ne!(reissued, idle);
    }

    #[test]
    fn cookieless_clients_do_not_accumulate() {
        let registry = registry();
        let start = Instant::now();
        for round in 0..1000u32 {
            let (_, handle, _) = registry.resolve_at(None, start + TTL * round);
            drop(handle);
        }
        assert_eq!(active(&registry), 1);
    }

    #[test]
    fn sessions_in_use_survive_expiry() {
        let registry = registry();
        let start = Instant::now();
        let (_, held, _) = registry.resolve_at(None, start);

        registry.resolve_at(None, start + TTL * 2);
        assert_eq!(active(&registry), 2);
        drop(held);
    }
}
