//! Session storage
//!
//! Sessions live only for the lifetime of the process. Nothing expires on
//! its own: a session stays in the store until it is explicitly removed.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::{Error, Result};
use crate::session::Session;

/// Storage for live sessions, keyed by session id
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Snapshot of a session
    async fn get(&self, id: &str) -> Result<Option<Session>>;

    /// Insert or replace a session
    async fn put(&self, session: Session) -> Result<()>;

    /// Overwrite a session that is still live
    ///
    /// Fails with `SessionNotFound` when the id has been removed in the
    /// meantime, so an ended session is never written back.
    async fn replace(&self, session: Session) -> Result<()>;

    /// Remove a session, returning it if it existed
    async fn delete(&self, id: &str) -> Result<Option<Session>>;

    /// Number of live sessions
    async fn len(&self) -> Result<usize>;
}

/// In-memory session store
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<DashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.get(id).map(|s| s.clone()))
    }

    async fn put(&self, session: Session) -> Result<()> {
        self.sessions.insert(session.id.clone(), session);
        Ok(())
    }

    async fn replace(&self, session: Session) -> Result<()> {
        // get_mut holds the shard lock, so a concurrent delete cannot interleave
        match self.sessions.get_mut(&session.id) {
            Some(mut entry) => {
                *entry = session;
                Ok(())
            }
            None => Err(Error::SessionNotFound(session.id)),
        }
    }

    async fn delete(&self, id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.remove(id).map(|(_, s)| s))
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.sessions.len())
    }
}
