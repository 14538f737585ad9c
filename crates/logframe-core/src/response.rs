use serde::{Deserialize, Serialize};

/// Uniform response envelope for all wrapped API calls.
///
/// Invariant: `success == true` implies `error` is absent, and
/// `success == false` implies `data` is absent. The constructors uphold
/// this; there is no reason to build one field-by-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with data.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create a successful response without a body (HTTP 204).
    pub fn ok_empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Check if the response is successful.
    pub fn is_ok(&self) -> bool {
        self.success
    }

    /// Check if the response carries an error.
    pub fn is_err(&self) -> bool {
        !self.success
    }

    /// Convert into a Result, consuming the response.
    ///
    /// Successful responses may legitimately carry no data (204), hence
    /// `Option<T>` on the Ok side.
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.error.unwrap_or_else(|| "Unknown error".to_string()))
        }
    }

    /// Map the data value, preserving success/error state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_has_no_error() {
        let resp = ApiResponse::ok(json!({"x": 1}));
        assert!(resp.is_ok());
        assert!(resp.error.is_none());
        assert_eq!(resp.data, Some(json!({"x": 1})));
    }

    #[test]
    fn err_has_no_data() {
        let resp: ApiResponse<()> = ApiResponse::err("bad input");
        assert!(resp.is_err());
        assert!(resp.data.is_none());
        assert_eq!(resp.error.as_deref(), Some("bad input"));
    }

    #[test]
    fn ok_empty_is_success_without_data() {
        let resp: ApiResponse<serde_json::Value> = ApiResponse::ok_empty();
        assert!(resp.is_ok());
        assert!(resp.data.is_none());
        assert!(resp.error.is_none());
    }

    #[test]
    fn into_result() {
        let ok: ApiResponse<i32> = ApiResponse::ok(5);
        assert_eq!(ok.into_result(), Ok(Some(5)));

        let err: ApiResponse<i32> = ApiResponse::err("nope");
        assert_eq!(err.into_result(), Err("nope".to_string()));
    }

    #[test]
    fn serde_omits_absent_fields() {
        let ok = ApiResponse::ok(json!([1, 2]));
        let text = serde_json::to_string(&ok).unwrap();
        assert_eq!(text, r#"{"success":true,"data":[1,2]}"#);

        let err: ApiResponse<serde_json::Value> = ApiResponse::err("denied");
        let text = serde_json::to_string(&err).unwrap();
        assert_eq!(text, r#"{"success":false,"error":"denied"}"#);
    }

    #[test]
    fn serde_roundtrip() {
        let resp: ApiResponse<serde_json::Value> =
            serde_json::from_str(r#"{"success":true,"data":{"id":"o1"}}"#).unwrap();
        assert!(resp.is_ok());
        assert_eq!(resp.data, Some(json!({"id": "o1"})));
    }

    #[test]
    fn map_preserves_state() {
        let resp = ApiResponse::ok(2).map(|n| n * 10);
        assert_eq!(resp.data, Some(20));

        let resp: ApiResponse<i32> = ApiResponse::err("x");
        let mapped = resp.map(|n| n * 10);
        assert!(mapped.is_err());
    }
}
