use std::fmt;

use serde_json::Value as JsonValue;

/// Database-level error fields as surfaced by the backend's REST gateway.
///
/// Postgres errors arrive with a SQLSTATE `code` (e.g. `23505` for unique
/// violations, `42501` for insufficient privilege) plus free-text `message`,
/// `details`, and `hint` fields. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbError {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
}

impl DbError {
    /// Normalize an error payload into database error fields.
    ///
    /// The REST gateway and the auth gateway disagree on nesting: some
    /// responses carry `code`/`message`/`details`/`hint` at the top level,
    /// others wrap them in an `error` object. Precedence: top-level fields
    /// win; the nested `error` object is consulted only for fields the top
    /// level does not provide. This is the only place that raw error JSON
    /// is inspected.
    pub fn from_value(value: &JsonValue) -> Self {
        let top = Self::fields_of(value);
        let nested = value
            .get("error")
            .map(Self::fields_of)
            .unwrap_or_default();
        Self {
            code: top.code.or(nested.code),
            message: top.message.or(nested.message),
            details: top.details.or(nested.details),
            hint: top.hint.or(nested.hint),
        }
    }

    fn fields_of(value: &JsonValue) -> Self {
        let get = |key: &str| {
            value
                .get(key)
                .and_then(JsonValue::as_str)
                .map(str::to_owned)
        };
        Self {
            code: get("code"),
            message: get("message"),
            details: get("details"),
            hint: get("hint"),
        }
    }

    /// Extract the most informative error message from the fields.
    pub fn error_message(&self) -> String {
        self.message
            .as_deref()
            .or(self.details.as_deref())
            .or(self.hint.as_deref())
            .unwrap_or("Unknown database error")
            .to_string()
    }
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{}: {}", code, self.error_message()),
            None => write!(f, "{}", self.error_message()),
        }
    }
}

/// All errors surfaced by the backend collaborator seam.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Database/REST error with Postgres error fields attached.
    #[error("{0}")]
    Database(DbError),

    /// Auth operation failed.
    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Expected exactly one row, but got none")]
    NoRows,

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Subscription quota or policy restriction, carrying the user-facing
    /// message composed by the limits translator.
    #[error("{0}")]
    SubscriptionLimit(String),

    #[error("Backend error: {0}")]
    Other(String),
}

impl BackendError {
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Database error fields, when this error carries them.
    pub fn db_fields(&self) -> Option<&DbError> {
        match self {
            Self::Database(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Result alias using BackendError.
pub type BackendResult<T> = Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_top_level() {
        let fields = DbError::from_value(&json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint",
            "details": "Key (name)=(x) already exists.",
        }));
        assert_eq!(fields.code.as_deref(), Some("23505"));
        assert_eq!(
            fields.message.as_deref(),
            Some("duplicate key value violates unique constraint")
        );
        assert!(fields.hint.is_none());
    }

    #[test]
    fn from_value_nested_error() {
        let fields = DbError::from_value(&json!({
            "error": { "code": "42501", "message": "permission denied for table outcomes" }
        }));
        assert_eq!(fields.code.as_deref(), Some("42501"));
        assert_eq!(
            fields.message.as_deref(),
            Some("permission denied for table outcomes")
        );
    }

    #[test]
    fn from_value_top_level_wins_over_nested() {
        let fields = DbError::from_value(&json!({
            "code": "23505",
            "error": { "code": "42501", "hint": "check your plan" }
        }));
        assert_eq!(fields.code.as_deref(), Some("23505"));
        // Fields absent at the top level still come from the nested object.
        assert_eq!(fields.hint.as_deref(), Some("check your plan"));
    }

    #[test]
    fn from_value_non_string_fields_ignored() {
        let fields = DbError::from_value(&json!({ "code": 23505, "message": "dup" }));
        assert!(fields.code.is_none());
        assert_eq!(fields.message.as_deref(), Some("dup"));
    }

    #[test]
    fn error_message_precedence() {
        let fields = DbError {
            code: None,
            message: None,
            details: Some("row violates policy".into()),
            hint: Some("upgrade".into()),
        };
        assert_eq!(fields.error_message(), "row violates policy");

        let fields = DbError::default();
        assert_eq!(fields.error_message(), "Unknown database error");
    }

    #[test]
    fn display_includes_code() {
        let err = BackendError::Database(DbError {
            code: Some("42501".into()),
            message: Some("permission denied".into()),
            details: None,
            hint: None,
        });
        assert_eq!(err.to_string(), "42501: permission denied");
    }

    #[test]
    fn db_fields_accessor() {
        let err = BackendError::Database(DbError::default());
        assert!(err.db_fields().is_some());
        assert!(BackendError::NoRows.db_fields().is_none());
    }
}
