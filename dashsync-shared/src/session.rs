//! Session persistence.
//!
//! A session is an opaque bearer token plus a [`SessionMarker`], both kept in a
//! pluggable key-value backend: browser local storage on the web, a JSON file
//! for the terminal client, and [`MemoryStore`] in tests.

use crate::models::SessionMarker;
use std::{
    cell::RefCell,
    collections::HashMap,
    fmt,
    rc::Rc,
};
use thiserror::Error;
use tracing::{info, warn};

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key for the JSON-encoded session marker.
pub const MARKER_KEY: &str = "userSession";

/// Failures raised by a storage backend.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session storage is unavailable: {0}")]
    Unavailable(String),

    #[error("failed to write session key '{key}': {reason}")]
    Write { key: String, reason: String },

    #[error("failed to encode session marker: {0}")]
    Encode(String),
}

/// Minimal string key-value backend.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns [`SessionError`] when the backend refuses the write.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Remove `key`; removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns [`SessionError`] when the backend refuses the write.
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// In-process backend. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Typed access to the token and marker on top of a [`KeyValueStore`].
///
/// Tokens are stored verbatim and never inspected or expired here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStore<S> {
    backend: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub const fn new(backend: S) -> Self {
        Self { backend }
    }

    /// # Errors
    /// Propagates backend write failures.
    pub fn save_token(&self, token: &str) -> Result<(), SessionError> {
        self.backend.set(TOKEN_KEY, token)
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.backend.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    /// # Errors
    /// Propagates backend write failures.
    pub fn clear_token(&self) -> Result<(), SessionError> {
        self.backend.remove(TOKEN_KEY)
    }

    /// # Errors
    /// Returns [`SessionError::Encode`] if the marker cannot be serialized,
    /// or propagates backend write failures.
    pub fn save_marker(&self, marker: &SessionMarker) -> Result<(), SessionError> {
        let encoded =
            serde_json::to_string(marker).map_err(|err| SessionError::Encode(err.to_string()))?;
        self.backend.set(MARKER_KEY, &encoded)
    }

    /// The stored marker. Undecodable values are treated as absent.
    #[must_use]
    pub fn marker(&self) -> Option<SessionMarker> {
        let raw = self.backend.get(MARKER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(marker) => Some(marker),
            Err(err) => {
                warn!(error = %err, "ignoring undecodable session marker");
                None
            }
        }
    }

    /// # Errors
    /// Propagates backend write failures.
    pub fn clear_marker(&self) -> Result<(), SessionError> {
        self.backend.remove(MARKER_KEY)
    }

    pub const fn backend(&self) -> &S {
        &self.backend
    }
}

/// The signed-in state restored from, or written to, a [`SessionStore`].
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub marker: Option<SessionMarker>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("marker", &self.marker)
            .finish()
    }
}

/// Explicit session lifecycle handed to whichever view needs it.
///
/// [`SessionContext::init`] restores a persisted session at start-up,
/// [`SessionContext::establish`] records a new sign-in, and
/// [`SessionContext::teardown`] clears both token and marker. Token presence
/// is the only authentication predicate; the marker is informational.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext<S> {
    store: SessionStore<S>,
    current: Option<Session>,
}

impl<S: KeyValueStore> SessionContext<S> {
    /// Restores whatever session the backend holds.
    pub fn init(backend: S) -> Self {
        let store = SessionStore::new(backend);
        let current = store.token().map(|token| Session {
            token,
            marker: store.marker(),
        });
        Self { store, current }
    }

    /// Persists a fresh sign-in and makes it current.
    ///
    /// # Errors
    /// Propagates backend failures. Nothing that would authenticate a later
    /// [`SessionContext::init`] is left behind, and the in-memory session is
    /// left unchanged.
    pub fn establish(&mut self, token: &str, marker: SessionMarker) -> Result<(), SessionError> {
        // The token is written last: its presence is what signs a visitor in.
        self.store.save_marker(&marker)?;
        if let Err(err) = self.store.save_token(token) {
            if let Err(cleanup) = self.store.clear_marker() {
                warn!(error = %cleanup, "could not clear marker after failed sign-in");
            }
            return Err(err);
        }
        info!(email = %marker.email, "session established");
        self.current = Some(Session {
            token: token.to_string(),
            marker: Some(marker),
        });
        Ok(())
    }

    /// Clears the token and marker from the backend and from memory.
    ///
    /// # Errors
    /// Propagates backend failures. The in-memory session is cleared even
    /// then, so the visitor is treated as signed out.
    pub fn teardown(&mut self) -> Result<(), SessionError> {
        self.current = None;
        let token_result = self.store.clear_token();
        let marker_result = self.store.clear_marker();
        info!("session cleared");
        token_result.and(marker_result)
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|session| session.token.as_str())
    }

    #[must_use]
    pub fn marker(&self) -> Option<&SessionMarker> {
        self.current
            .as_ref()
            .and_then(|session| session.marker.as_ref())
    }

    pub const fn store(&self) -> &SessionStore<S> {
        &self.store
    }
}
