use crate::domain::{BookingSession, BookingSessionId};
use crate::ports::session_store::{Result, SessionStore as SessionStoreTrait};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory implementation of SessionStore
///
/// The lock is only held for the map operation itself, never across an await.
pub struct SessionStore {
    sessions: Mutex<HashMap<BookingSessionId, BookingSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStoreTrait for SessionStore {
    async fn save(&self, session: BookingSession) -> Result<()> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.session_id, session);
        Ok(())
    }

    async fn get(&self, session_id: BookingSessionId) -> Result<Option<BookingSession>> {
        Ok(self.sessions.lock().unwrap().get(&session_id).cloned())
    }

    async fn remove(&self, session_id: BookingSessionId) -> Result<Option<BookingSession>> {
        Ok(self.sessions.lock().unwrap().remove(&session_id))
    }
}
