use std::fmt;

use serde_json::Value as JsonValue;

/// HTTP method for a wrapped request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Options for a wrapped request: method, headers, query pairs, JSON body.
///
/// Caller-supplied headers take precedence over the defaults the client
/// attaches (content type and authorization).
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<JsonValue>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }
}

/// A file to send through the multipart upload variant.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Multipart form field name (e.g. "file").
    pub field_name: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// MIME type of the part. The request's own content type is left to the
    /// transport so the multipart boundary is set correctly.
    pub content_type: Option<String>,
}

impl FileUpload {
    pub fn new(field_name: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field_name: field_name.into(),
            file_name: file_name.into(),
            bytes,
            content_type: None,
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Error body shapes returned by the API.
///
/// Handlers disagree on the field name; this covers the common ones.
#[derive(Debug, Clone, Default)]
pub struct ErrorBody {
    pub msg: Option<String>,
    pub message: Option<String>,
    pub error_description: Option<String>,
    pub error: Option<String>,
}

impl ErrorBody {
    /// Extract the known message fields from a parsed body.
    ///
    /// Non-string fields (e.g. a structured `error` object) are ignored
    /// rather than failing the extraction.
    pub fn from_value(value: &JsonValue) -> Self {
        let get = |key: &str| {
            value
                .get(key)
                .and_then(JsonValue::as_str)
                .map(str::to_owned)
        };
        Self {
            msg: get("msg"),
            message: get("message"),
            error_description: get("error_description"),
            error: get("error"),
        }
    }

    /// The most informative message, falling back to `HTTP <status>`.
    pub fn message_or_status(&self, status: u16) -> String {
        self.msg
            .as_deref()
            .or(self.message.as_deref())
            .or(self.error_description.as_deref())
            .or(self.error.as_deref())
            .map(str::to_owned)
            .unwrap_or_else(|| format!("HTTP {}", status))
    }
}
