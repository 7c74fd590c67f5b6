//! Authentication session container
//!
//! The login flow writes the session; the HTTP layer only reads the token.

use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub email: String,
}

/// Shared handle to the current session
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bearer token of the signed-in user, if any
    pub fn token(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|s| s.as_ref().map(|s| s.token.clone()))
    }

    pub fn email(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|s| s.as_ref().map(|s| s.email.clone()))
    }

    pub fn sign_in(&self, session: Session) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = Some(session);
        }
    }

    pub fn sign_out(&self) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = None;
        }
    }
}
