//! Signed-in recruiter context, rehydrated from a key-value store and cleared on logout.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const SESSION_KEY: &str = "hireflow.session";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Durable key-value adapter (browser storage, a file, or memory in tests).
pub trait SessionStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn save(&self, key: &str, value: String) -> Result<(), SessionError>;
    fn clear(&self, key: &str) -> Result<(), SessionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session store unavailable: {0}")]
    Store(String),
    #[error("stored session is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySessionStore {
    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, SessionError> {
        self.entries
            .lock()
            .map_err(|_| SessionError::Store("session mutex poisoned".to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: String) -> Result<(), SessionError> {
        self.entries()?.insert(key.to_string(), value);
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), SessionError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct PersistedSession {
    user: Option<SessionUser>,
}

/// Explicit session context handed to whatever needs the current user.
pub struct SessionContext<S> {
    store: Arc<S>,
    user: Option<SessionUser>,
}

impl<S: SessionStore> SessionContext<S> {
    /// Restore the persisted user, if any.
    pub fn rehydrate(store: Arc<S>) -> Result<Self, SessionError> {
        let user = match store.load(SESSION_KEY)? {
            Some(raw) => serde_json::from_str::<PersistedSession>(&raw)?.user,
            None => None,
        };
        Ok(Self { store, user })
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn login(&mut self, user: SessionUser) -> Result<(), SessionError> {
        let persisted = PersistedSession {
            user: Some(user.clone()),
        };
        self.store
            .save(SESSION_KEY, serde_json::to_string(&persisted)?)?;
        self.user = Some(user);
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.store.clear(SESSION_KEY)?;
        self.user = None;
        Ok(())
    }
}
