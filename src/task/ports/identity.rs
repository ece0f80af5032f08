//! Identity port supplying the signed-in user.

use crate::task::domain::UserId;

/// Source of the currently authenticated user.
///
/// Authentication itself belongs to an external provider; task services only
/// need the identifier that scopes store queries.
pub trait IdentityProvider: Send + Sync {
    /// Returns the signed-in user, or `None` when nobody is signed in.
    fn current_user(&self) -> Option<UserId>;
}
