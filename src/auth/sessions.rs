use std::collections::HashMap;

use axum::http::HeaderMap;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Session {
    user_id: i64,
    expires_at: OffsetDateTime,
}

/// Server-side session map: UUID session ID → user, with absolute expiry.
///
/// The ID travels in an HttpOnly cookie; expired entries are dropped lazily
/// on resolve and swept by a periodic prune loop.
pub struct SessionStore {
    cookie_name: String,
    ttl: Duration,
    secure: bool,
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new(cookie_name: impl Into<String>, ttl: Duration, secure: bool) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            ttl,
            secure,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create(&self, user_id: i64) -> Uuid {
        let id = Uuid::new_v4();
        let session = Session {
            user_id,
            expires_at: OffsetDateTime::now_utc() + self.ttl,
        };
        self.sessions.write().await.insert(id, session);
        id
    }

    /// Resolve a session ID to its user, dropping the entry if expired.
    pub async fn resolve(&self, id: Uuid) -> Option<i64> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(&id) {
            Some(session) if session.expires_at > OffsetDateTime::now_utc() => {
                Some(session.user_id)
            }
            Some(_) => {
                sessions.remove(&id);
                None
            }
            None => None,
        }
    }

    pub async fn destroy(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Sweep expired sessions; returns how many were removed.
    pub async fn prune_expired(&self) -> usize {
        let now = OffsetDateTime::now_utc();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        before - sessions.len()
    }

    /// Extract the session ID from a request's Cookie header, if present.
    pub fn session_id_from_headers(&self, headers: &HeaderMap) -> Option<Uuid> {
        let cookies = headers
            .get(axum::http::header::COOKIE)
            .and_then(|v| v.to_str().ok())?;
        for cookie in cookies.split(';') {
            let mut parts = cookie.trim().splitn(2, '=');
            if parts.next() == Some(self.cookie_name.as_str()) {
                return parts.next().and_then(|v| Uuid::parse_str(v).ok());
            }
        }
        None
    }

    /// Set-Cookie value establishing a session.
    pub fn set_cookie(&self, id: Uuid) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.cookie_name,
            id,
            self.ttl.whole_seconds()
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// Set-Cookie value clearing the session cookie.
    pub fn clear_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            self.cookie_name
        )
    }
}
