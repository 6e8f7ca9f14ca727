//! Server-side wizard sessions.
//!
//! A session is created on successful login and identified by a random
//! UUID carried in a cookie; presence in the store is what "logged in"
//! means. Each session tracks the wizard's `current_step` and an expiry
//! instant that slides forward on every authenticated request.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::error::ApiError;
use super::state::ApiState;

pub const SESSION_COOKIE: &str = "quickstart_session";

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub current_step: u32,
    expires_at: DateTime<Utc>,
}

impl Session {
    fn expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// In-memory session store with sliding expiry.
#[derive(Clone)]
pub struct SessionStore {
    ttl: Duration,
    inner: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            ttl: Duration::minutes(ttl_minutes),
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Create a fresh session at wizard step 1.
    pub fn create(&self) -> Session {
        let session = Session {
            id: Uuid::new_v4(),
            current_step: 1,
            expires_at: Utc::now() + self.ttl,
        };
        self.inner
            .lock()
            .unwrap()
            .insert(session.id, session.clone());
        session
    }

    /// Look up a session, refreshing its expiry. Expired sessions are
    /// removed and reported as absent.
    pub fn get(&self, id: Uuid) -> Option<Session> {
        let now = Utc::now();
        let mut sessions = self.inner.lock().unwrap();
        sessions.retain(|_, session| !session.expired(now));

        let session = sessions.get_mut(&id)?;
        session.expires_at = now + self.ttl;
        Some(session.clone())
    }

    /// Update the wizard step for a session.
    pub fn set_step(&self, id: Uuid, step: u32) -> Option<Session> {
        let mut sessions = self.inner.lock().unwrap();
        let session = sessions.get_mut(&id)?;
        session.current_step = step;
        Some(session.clone())
    }
}

/// Extract the session id from the request's `Cookie` header.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Uuid::parse_str(value).ok()
        } else {
            None
        }
    })
}

/// `Set-Cookie` value for a newly created session.
pub fn session_cookie(id: Uuid) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

/// Look up the request's session against the store, if it has one.
pub fn session_from_headers(state: &ApiState, headers: &HeaderMap) -> Option<Session> {
    session_id_from_headers(headers).and_then(|id| state.sessions.get(id))
}

/// Extractor that gates a handler behind a live session.
///
/// Rejects with 401 when the cookie is missing, unknown, or expired.
pub struct CurrentSession(pub Session);

#[async_trait]
impl FromRequestParts<ApiState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ApiState,
    ) -> Result<Self, Self::Rejection> {
        session_from_headers(state, &parts.headers)
            .map(CurrentSession)
            .ok_or(ApiError::Unauthorized)
    }
}
