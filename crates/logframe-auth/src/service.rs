use std::sync::Arc;

use tracing::debug;

use logframe_backend::{
    AuthBackend, AuthStateCallback, AuthSubscription, DataBackend, Profile, Session,
    UpdateUserParams,
};
use logframe_core::{ApiResponse, BackendError, BackendResult};

use crate::types::{AuthData, ProfileUpdate};

/// Table holding application profile rows, keyed by the auth identity's id.
const PROFILES_TABLE: &str = "profiles";

/// Auth facade over the backend auth gateway and the `profiles` table.
///
/// Constructed with injected backends; holds no state of its own beyond the
/// two `Arc`s, so cloning is cheap and concurrent calls are independent.
#[derive(Clone)]
pub struct AuthService {
    auth: Arc<dyn AuthBackend>,
    data: Arc<dyn DataBackend>,
}

impl AuthService {
    pub fn new(auth: Arc<dyn AuthBackend>, data: Arc<dyn DataBackend>) -> Self {
        Self { auth, data }
    }

    // ─── Sign In / Sign Out ────────────────────────────────────

    /// Sign in with email and password, then load the caller's profile.
    ///
    /// Two-step guarantee: a session is never handed to the caller without
    /// its matching profile. When the profile row is missing, the sign-in
    /// result is discarded and the caller sees a failure even though
    /// authentication itself succeeded.
    pub async fn login(&self, email: &str, password: &str) -> ApiResponse<AuthData> {
        let response = match self.auth.sign_in_with_password(email, password).await {
            Ok(response) => response,
            Err(e) => {
                debug!(email, "Sign-in failed: {}", e);
                return ApiResponse::err(login_failure_message(&e));
            }
        };

        let Some(session) = response.session else {
            return ApiResponse::err("Invalid email or password");
        };

        match self.profile_of(&session.user.id).await {
            Ok(Some(profile)) => ApiResponse::ok(AuthData {
                session,
                user: profile,
            }),
            Ok(None) => ApiResponse::err("User profile not found"),
            Err(e) => ApiResponse::err(e.to_string()),
        }
    }

    /// Sign out of the current session.
    pub async fn logout(&self) -> ApiResponse<()> {
        match self.auth.sign_out().await {
            Ok(()) => ApiResponse::ok_empty(),
            Err(e) => ApiResponse::err(e.to_string()),
        }
    }

    // ─── Session ───────────────────────────────────────────────

    /// The current session, if any. Pass-through: no envelope, no
    /// translation.
    pub async fn session(&self) -> BackendResult<Option<Session>> {
        self.auth.session().await
    }

    /// True iff a session currently exists.
    pub async fn is_authenticated(&self) -> bool {
        matches!(self.session().await, Ok(Some(_)))
    }

    /// Register a state-change callback with the backend and return its
    /// unsubscribe handle.
    pub fn on_auth_state_change(&self, callback: AuthStateCallback) -> AuthSubscription {
        self.auth.on_auth_state_change(callback)
    }

    // ─── Profile ───────────────────────────────────────────────

    /// The caller's profile row.
    pub async fn get_profile(&self) -> ApiResponse<Profile> {
        let user = match self.auth.current_user().await {
            Ok(Some(user)) => user,
            Ok(None) => return ApiResponse::err("Authentication required"),
            Err(e) => return ApiResponse::err(e.to_string()),
        };

        match self.profile_of(&user.id).await {
            Ok(Some(profile)) => ApiResponse::ok(profile),
            Ok(None) => ApiResponse::err("User profile not found"),
            Err(e) => ApiResponse::err(e.to_string()),
        }
    }

    /// Update the caller's profile row.
    ///
    /// Only the recognized fields (first name, last name, email) are
    /// forwarded. Fails when the backend reports no updated record.
    pub async fn update_profile(&self, update: ProfileUpdate) -> ApiResponse<Profile> {
        let user = match self.auth.current_user().await {
            Ok(Some(user)) => user,
            Ok(None) => return ApiResponse::err("Authentication required"),
            Err(e) => return ApiResponse::err(e.to_string()),
        };

        let patch = match serde_json::to_value(&update) {
            Ok(patch) => patch,
            Err(e) => return ApiResponse::err(e.to_string()),
        };

        match self.data.update(PROFILES_TABLE, &user.id, patch).await {
            Ok(row) => match serde_json::from_value(row) {
                Ok(profile) => ApiResponse::ok(profile),
                Err(e) => ApiResponse::err(e.to_string()),
            },
            Err(BackendError::NoRows) => ApiResponse::err("User profile not found"),
            Err(e) => ApiResponse::err(e.to_string()),
        }
    }

    /// Change the caller's password.
    ///
    /// The current password is accepted for interface compatibility but is
    /// not sent to the backend; the gateway does not re-verify it on update.
    /// Known gap, raised with stakeholders rather than patched here.
    pub async fn change_password(
        &self,
        _current_password: &str,
        new_password: &str,
    ) -> ApiResponse<()> {
        match self
            .auth
            .update_user(UpdateUserParams::password(new_password))
            .await
        {
            Ok(_) => ApiResponse::ok_empty(),
            Err(e) => ApiResponse::err(e.to_string()),
        }
    }

    // ─── Internal Helpers ──────────────────────────────────────

    async fn profile_of(&self, user_id: &str) -> BackendResult<Option<Profile>> {
        let row = self.data.select_by_id(PROFILES_TABLE, user_id).await?;
        row.map(serde_json::from_value)
            .transpose()
            .map_err(Into::into)
    }
}

/// The message shown for a failed credential sign-in: the backend's own
/// message when it has one, otherwise the generic fallback.
fn login_failure_message(err: &BackendError) -> String {
    let message = match err {
        BackendError::Auth(msg) => msg.clone(),
        other => other.to_string(),
    };
    if message.is_empty() {
        "Invalid email or password".to_string()
    } else {
        message
    }
}
