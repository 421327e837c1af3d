use std::sync::{Arc, RwLock};

use tracing::error;

use super::errors::SessionError;
use super::{parse_stored_session, SessionStore};
use crate::models::Session;

/// In-memory session storage.
///
/// Holds the serialized session text rather than the parsed value so it
/// behaves exactly like durable storage, including when the content is
/// corrupt. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    raw: Arc<RwLock<Option<String>>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose slot already holds `raw`, parsed lazily on read
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Arc::new(RwLock::new(Some(raw.into()))),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn save_session(&self, session: &Session) -> Result<(), SessionError> {
        let serialized = serde_json::to_string(session)?;
        let mut slot = self.raw.write()?;
        *slot = Some(serialized);
        Ok(())
    }

    fn current_session(&self) -> Option<Session> {
        let slot = match self.raw.read() {
            Ok(slot) => slot,
            Err(e) => {
                error!("Session lock poisoned: {}", e);
                return None;
            }
        };
        slot.as_deref().and_then(|raw| parse_stored_session(raw, "memory"))
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut slot = self.raw.write()?;
        *slot = None;
        Ok(())
    }
}
