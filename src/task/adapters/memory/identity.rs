//! In-memory session identity.

use std::sync::{Arc, PoisonError, RwLock};

use crate::task::{domain::UserId, ports::IdentityProvider};

/// Identity provider holding the signed-in user in memory.
///
/// Stands in for the hosted authentication service: sign-in and sign-out
/// only swap the cached identifier.
#[derive(Debug, Clone, Default)]
pub struct SessionIdentity {
    current: Arc<RwLock<Option<UserId>>>,
}

impl SessionIdentity {
    /// Creates a signed-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session already signed in as `user`.
    #[must_use]
    pub fn signed_in(user: UserId) -> Self {
        Self {
            current: Arc::new(RwLock::new(Some(user))),
        }
    }

    /// Signs `user` in, replacing any previous user.
    pub fn sign_in(&self, user: UserId) {
        self.replace(Some(user));
    }

    /// Signs the current user out.
    pub fn sign_out(&self) {
        self.replace(None);
    }

    // Poisoning cannot leave a partially written session.
    fn replace(&self, user: Option<UserId>) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = user;
    }
}

impl IdentityProvider for SessionIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
