//! Who is signed in, if anyone.
//!
//! The vault asks an [`IdentityProvider`] on every call to decide between the
//! local and the remote store, so signing in or out takes effect immediately.

use std::sync::RwLock;

pub trait IdentityProvider: Send + Sync {
    /// Stable key of the signed-in identity, or `None` when signed out.
    fn current_identity(&self) -> Option<String>;

    fn is_active(&self) -> bool {
        self.current_identity().is_some()
    }
}

/// Never signed in. Every call routes to the local store.
#[derive(Debug, Default, Clone, Copy)]
pub struct Anonymous;

impl IdentityProvider for Anonymous {
    fn current_identity(&self) -> Option<String> {
        None
    }
}

/// A sign-in session that can change at runtime.
#[derive(Debug, Default)]
pub struct Session {
    user: RwLock<Option<String>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: impl Into<String>) -> Self {
        Self {
            user: RwLock::new(Some(user.into())),
        }
    }

    pub fn sign_in(&self, user: impl Into<String>) {
        let user = user.into();
        tracing::info!(user = %user, "identity signed in");
        *self.user.write().unwrap_or_else(|e| e.into_inner()) = Some(user);
    }

    pub fn sign_out(&self) {
        tracing::info!("identity signed out");
        *self.user.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl IdentityProvider for Session {
    fn current_identity(&self) -> Option<String> {
        self.user.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
