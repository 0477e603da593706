use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Admin session state, held entirely by the browser as one cookie.
///
/// The cookie value is the base64-encoded JSON serialization of this
/// struct. The server keeps no session table, so a session cannot be
/// revoked from outside the browser; it only ages out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminSession {
    pub authenticated: bool,
    pub username: String,
    /// Login moment in epoch milliseconds.
    pub login_time: i64,
}

impl AdminSession {
    pub fn new(username: &str) -> Self {
        Self {
            authenticated: true,
            username: username.to_string(),
            login_time: now_ms(),
        }
    }

    /// Serialize into a cookie-safe value.
    pub fn encode(&self) -> String {
        // Serialization of this struct cannot fail
        let json = serde_json::to_string(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Parse a cookie value back into a live session.
    ///
    /// Anything that is not a well-formed, authenticated, unexpired
    /// session reads as "no session": undecodable base64, unparsable
    /// JSON, and sessions older than `ttl_ms` all yield `None`.
    pub fn decode(value: &str, ttl_ms: i64, now_ms: i64) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
        let session: AdminSession = serde_json::from_slice(&bytes).ok()?;
        if !session.authenticated {
            return None;
        }
        if session.is_expired_at(ttl_ms, now_ms) {
            return None;
        }
        Some(session)
    }

    /// A session is expired strictly after `login_time + ttl_ms`.
    pub fn is_expired_at(&self, ttl_ms: i64, now_ms: i64) -> bool {
        now_ms - self.login_time > ttl_ms
    }
}

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// -- Cookie helpers --

pub fn session_cookie(name: &str, session: &AdminSession, max_age_hours: u64) -> String {
    let max_age_secs = max_age_hours * 3600;
    format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        name,
        session.encode(),
        max_age_secs
    )
}

pub fn clear_session_cookie(name: &str) -> String {
    format!("{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0", name)
}
