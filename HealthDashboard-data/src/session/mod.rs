// Session storage module structure
pub mod errors;
mod in_memory;
mod storage;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::warn;

use crate::models::Session;

// Re-export commonly used types
pub use errors::SessionError;
pub use in_memory::InMemorySessionStore;
pub use storage::FileSessionStore;

/// Holder of the single client-side session.
///
/// Reads never fail: a missing or unparseable session is reported as `None`
/// so callers drop to the logged-out state instead of erroring.
pub trait SessionStore: Send + Sync {
    /// Persist `session` as the current session, replacing any previous one
    fn save_session(&self, session: &Session) -> Result<(), SessionError>;

    /// The stored session, or `None` if absent or malformed
    fn current_session(&self) -> Option<Session>;

    /// Remove the stored session. Clearing an absent session succeeds.
    fn clear(&self) -> Result<(), SessionError>;

    /// `Authorization: Bearer <token>` when a session with a token exists,
    /// otherwise an empty header set
    fn authorization_header(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        let Some(session) = self.current_session() else {
            return headers;
        };

        if !session.has_access_token() {
            return headers;
        }

        match HeaderValue::from_str(&format!("Bearer {}", session.access_token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Err(e) => {
                warn!("Stored access token is not a valid header value: {}", e);
            }
        }

        headers
    }
}

/// Parse stored session text, logging and discarding anything malformed
pub(crate) fn parse_stored_session(raw: &str, origin: &str) -> Option<Session> {
    match serde_json::from_str::<Session>(raw) {
        Ok(session) => Some(session),
        Err(e) => {
            warn!("Ignoring malformed session in {}: {}", origin, e);
            None
        }
    }
}
