use serde::{Deserialize, Serialize};

use logframe_backend::{Profile, Session};

/// Payload of a successful login: the session and its matching profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthData {
    pub session: Session,
    pub user: Profile,
}

/// Recognized profile-update fields.
///
/// Only these three ever leave the application; anything else on the profile
/// row changes through its own operation or not at all.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProfileUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
