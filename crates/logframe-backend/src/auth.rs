use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use logframe_core::BackendResult;

use crate::params::UpdateUserParams;
use crate::types::{AuthChangeEvent, AuthUser, Session, SignInResponse};

/// Callback invoked on auth state transitions.
pub type AuthStateCallback =
    Arc<dyn Fn(AuthChangeEvent, Option<Session>) + Send + Sync + 'static>;

/// Handle for an auth-state subscription.
///
/// Consuming it detaches the callback. Dropping it without calling
/// [`unsubscribe`](Self::unsubscribe) leaves the subscription active for the
/// lifetime of the backend.
pub struct AuthSubscription {
    unsubscribe: Box<dyn FnOnce() + Send>,
}

impl AuthSubscription {
    pub fn new(unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unsubscribe: Box::new(unsubscribe),
        }
    }

    /// Detach the callback from the backend's notification mechanism.
    pub fn unsubscribe(self) {
        (self.unsubscribe)();
    }
}

impl fmt::Debug for AuthSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSubscription").finish_non_exhaustive()
    }
}

/// Session and identity operations of the backend auth gateway.
///
/// All operations are single-attempt and non-blocking; retries and token
/// refresh are the implementation's concern, not this seam's.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// The current session, if one exists.
    async fn session(&self) -> BackendResult<Option<Session>>;

    /// Sign in with email and password.
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> BackendResult<SignInResponse>;

    /// Revoke the current session. Idempotent: signing out twice succeeds.
    async fn sign_out(&self) -> BackendResult<()>;

    /// The authenticated identity, or None when no session exists.
    async fn current_user(&self) -> BackendResult<Option<AuthUser>>;

    /// Update attributes of the authenticated user.
    async fn update_user(&self, params: UpdateUserParams) -> BackendResult<AuthUser>;

    /// Register a state-change callback with the backend's notification
    /// mechanism and return its unsubscribe handle.
    fn on_auth_state_change(&self, callback: AuthStateCallback) -> AuthSubscription;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn unsubscribe_runs_the_teardown() {
        let detached = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&detached);
        let sub = AuthSubscription::new(move || flag.store(true, Ordering::SeqCst));
        sub.unsubscribe();
        assert!(detached.load(Ordering::SeqCst));
    }
}
