/// Server-held session store
///
/// Sessions live in process memory, keyed by an opaque UUID that travels
/// to the client inside a signed cookie. The cookie value carries no user
/// data; everything about the logged-in user is looked up here on each
/// request.
///
/// A session existing in the store is what "logged in" means. Logout
/// removes the entry; a session that has not been touched for
/// [`IDLE_EXPIRY_MINUTES`] is dropped on next access. Restarting the
/// process clears the store, which logs everyone out.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Idle lifetime of a session. Not configurable per session; this is the
/// store's own default.
const IDLE_EXPIRY_MINUTES: i64 = 30;

/// State held for one logged-in client
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque session ID, also the cookie value
    pub id: String,

    /// ID of the authenticated user
    pub user_id: i64,

    /// Username of the authenticated user, kept for rendering
    pub username: String,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the session was last used
    pub last_accessed: DateTime<Utc>,
}

impl Session {
    fn new(user_id: i64, username: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            username,
            created_at: now,
            last_accessed: now,
        }
    }

    /// Whether the idle expiry has elapsed since last access
    pub fn is_expired(&self) -> bool {
        Utc::now()
            .signed_duration_since(self.last_accessed)
            .num_minutes()
            >= IDLE_EXPIRY_MINUTES
    }

    fn touch(&mut self) {
        self.last_accessed = Utc::now();
    }
}

/// In-memory session store shared across request handlers
///
/// Cloning the store clones the handle, not the sessions: all clones see
/// the same map.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a session for a freshly authenticated user
    ///
    /// Returns the opaque session ID to be placed in the cookie.
    pub async fn create(&self, user_id: i64, username: &str) -> String {
        let session = Session::new(user_id, username.to_string());
        let session_id = session.id.clone();
        self.sessions
            .write()
            .await
            .insert(session_id.clone(), session);
        session_id
    }

    /// Looks up a session by ID, refreshing its idle timer
    ///
    /// An expired session is removed and reported as absent, so callers
    /// never observe a stale login.
    pub async fn get(&self, session_id: &str) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(session_id) {
            if session.is_expired() {
                sessions.remove(session_id);
                return None;
            }
            session.touch();
            return Some(session.clone());
        }
        None
    }

    /// Removes a session
    ///
    /// Removing an ID that is not in the store is a no-op, which makes
    /// logout idempotent.
    pub async fn remove(&self, session_id: &str) {
        self.sessions.write().await.remove(session_id);
    }

    /// Drops every expired session
    pub async fn purge_expired(&self) {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| !session.is_expired());
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether the store holds no sessions
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get_session() {
        let store = SessionStore::new();
        let session_id = store.create(1, "alice").await;

        let session = store.get(&session_id).await;
        assert!(session.is_some());

        let session = session.unwrap();
        assert_eq!(session.user_id, 1);
        assert_eq!(session.username, "alice");
    }

    #[tokio::test]
    async fn test_get_unknown_session() {
        let store = SessionStore::new();
        assert!(store.get("no-such-session").await.is_none());
    }

    #[tokio::test]
    async fn test_remove_session() {
        let store = SessionStore::new();
        let session_id = store.create(1, "alice").await;

        store.remove(&session_id).await;
        assert!(store.get(&session_id).await.is_none());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let store = SessionStore::new();
        let session_id = store.create(1, "alice").await;

        store.remove(&session_id).await;
        store.remove(&session_id).await;
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_session_expiration() {
        let store = SessionStore::new();
        let session_id = store.create(1, "alice").await;

        // Backdate the session past the idle expiry
        {
            let mut sessions = store.sessions.write().await;
            if let Some(session) = sessions.get_mut(&session_id) {
                session.last_accessed =
                    Utc::now() - chrono::Duration::minutes(IDLE_EXPIRY_MINUTES + 1);
            }
        }

        assert!(store.get(&session_id).await.is_none());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let store = SessionStore::new();
        let stale = store.create(1, "alice").await;
        let fresh = store.create(2, "bob").await;

        {
            let mut sessions = store.sessions.write().await;
            if let Some(session) = sessions.get_mut(&stale) {
                session.last_accessed =
                    Utc::now() - chrono::Duration::minutes(IDLE_EXPIRY_MINUTES + 1);
            }
        }

        store.purge_expired().await;
        assert_eq!(store.len().await, 1);
        assert!(store.get(&fresh).await.is_some());
    }

    #[tokio::test]
    async fn test_clones_share_sessions() {
        let store = SessionStore::new();
        let clone = store.clone();

        let session_id = store.create(1, "alice").await;
        assert!(clone.get(&session_id).await.is_some());
    }
}
