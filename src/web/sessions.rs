// src/web/sessions.rs — In-memory session registry keyed by cookie

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::http::{header, HeaderMap};

use crate::core::Session;
use crate::service::FetchParameters;

pub const SESSION_COOKIE: &str = "retail_chat_session";

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// A session is driven by one request at a time; the async mutex serializes
/// concurrent requests from the same browser.
pub type SharedSession = Arc<tokio::sync::Mutex<Session>>;

struct Entry {
    session: SharedSession,
    last_seen: Instant,
}

/// Sessions not seen for longer than the idle timeout are dropped.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, Entry>>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

/// Result of resolving the caller's session.
pub struct SessionHandle {
    pub id: String,
    pub session: SharedSession,
    /// True when the session was created for this request and the cookie must be set.
    pub created: bool,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Live session by id. Marks it as seen; an idle one is removed instead.
    pub fn get(&self, id: &str) -> Option<SharedSession> {
        let now = Instant::now();
        let mut map = self.lock();
        let entry = map.get_mut(id)?;
        if now.duration_since(entry.last_seen) < self.idle_timeout {
            entry.last_seen = now;
            return Some(entry.session.clone());
        }
        map.remove(id);
        tracing::debug!(session = %id, "session expired");
        None
    }

    pub fn create(&self, settings: FetchParameters) -> SessionHandle {
        let session = Session::new(settings);
        let id = session.id.clone();
        let shared = Arc::new(tokio::sync::Mutex::new(session));
        let now = Instant::now();
        {
            let mut map = self.lock();
            self.evict_idle_locked(&mut map, now);
            map.insert(
                id.clone(),
                Entry {
                    session: shared.clone(),
                    last_seen: now,
                },
            );
        }
        tracing::info!(session = %id, "new session");
        SessionHandle {
            id,
            session: shared,
            created: true,
        }
    }

    /// Look up the session named by the request cookie, creating one if absent,
    /// unknown or expired.
    pub fn resolve(&self, headers: &HeaderMap, settings: &FetchParameters) -> SessionHandle {
        self.lookup(headers)
            .unwrap_or_else(|| self.create(settings.clone()))
    }

    /// Look up the session named by the request cookie without creating one.
    pub fn lookup(&self, headers: &HeaderMap) -> Option<SessionHandle> {
        let id = session_id_from_headers(headers)?;
        let session = self.get(&id)?;
        Some(SessionHandle {
            id,
            session,
            created: false,
        })
    }

    /// Drop every session idle at `now`. Returns how many were removed.
    pub fn evict_idle(&self, now: Instant) -> usize {
        let mut map = self.lock();
        self.evict_idle_locked(&mut map, now)
    }

    fn evict_idle_locked(&self, map: &mut HashMap<String, Entry>, now: Instant) -> usize {
        let before = map.len();
        map.retain(|_, entry| now.saturating_duration_since(entry.last_seen) < self.idle_timeout);
        let evicted = before - map.len();
        if evicted > 0 {
            tracing::debug!(evicted, "evicted idle sessions");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Session id from the `Cookie` header, if present.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn session_cookie(id: &str) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}
