use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "sid";

#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Cookie-backed session state, keyed by an opaque uuid token.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, user_id: i32) -> Uuid {
        let token = Uuid::new_v4();
        self.lock().insert(
            token,
            Session {
                user_id,
                created_at: Utc::now(),
            },
        );
        token
    }

    pub fn get(&self, token: Uuid) -> Option<Session> {
        self.lock().get(&token).cloned()
    }

    pub fn remove(&self, token: Uuid) -> bool {
        self.lock().remove(&token).is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Session>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(token: Uuid) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value clearing the session on logout.
pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
