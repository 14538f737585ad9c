use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Parameters for updating the authenticated user at the auth gateway.
///
/// Only set fields are forwarded; the gateway ignores the rest.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateUserParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl UpdateUserParams {
    /// Params that change only the password.
    pub fn password(password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
            ..Default::default()
        }
    }
}
