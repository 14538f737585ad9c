use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;
use url::Url;

use logframe_backend::AuthBackend;
use logframe_core::{ApiConfig, ApiResponse, AppEvent, EventBus};

use crate::error::ApiClientError;
use crate::types::{ErrorBody, FileUpload, HttpMethod, RequestOptions};

/// Authenticated HTTP client for the Logframe API.
///
/// Every request resolves the current bearer token from the auth backend,
/// and every outcome — transport failure, malformed body, error status —
/// lands in the [`ApiResponse`] envelope rather than a `Result`. A 401
/// response forces a sign-out and broadcasts the unauthorized event before
/// the envelope is returned.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    auth: Arc<dyn AuthBackend>,
    events: EventBus,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// The auth backend supplies the bearer token per request and receives
    /// the forced sign-out on 401; the event bus carries the unauthorized
    /// broadcast to whoever subscribed.
    pub fn new(
        config: ApiConfig,
        auth: Arc<dyn AuthBackend>,
        events: EventBus,
    ) -> Result<Self, ApiClientError> {
        let base = config.base_url.trim_end_matches('/');
        let base_url = Url::parse(base)?;
        if base_url.cannot_be_a_base() {
            return Err(ApiClientError::InvalidConfig(format!(
                "Base URL '{}' cannot carry request paths",
                config.base_url
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiClientError::Http)?;

        Ok(Self {
            http,
            base_url,
            auth,
            events,
        })
    }

    /// Get the base URL requests are issued against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ─── Convenience Verbs ─────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResponse<T> {
        self.request(path, RequestOptions::new()).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: JsonValue) -> ApiResponse<T> {
        self.request(
            path,
            RequestOptions::new().method(HttpMethod::Post).body(body),
        )
        .await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: JsonValue) -> ApiResponse<T> {
        self.request(
            path,
            RequestOptions::new().method(HttpMethod::Put).body(body),
        )
        .await
    }

    pub async fn patch<T: DeserializeOwned>(&self, path: &str, body: JsonValue) -> ApiResponse<T> {
        self.request(
            path,
            RequestOptions::new().method(HttpMethod::Patch).body(body),
        )
        .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResponse<T> {
        self.request(path, RequestOptions::new().method(HttpMethod::Delete))
            .await
    }

    // ─── Core Request ──────────────────────────────────────────

    /// Issue a request and normalize the outcome into the envelope.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResponse<T> {
        let url = self.url(path);
        debug!(method = %options.method, %url, "API request");

        let headers = match self.build_headers(&options, true).await {
            Ok(headers) => headers,
            Err(message) => return ApiResponse::err(message),
        };

        let mut req = self.builder(options.method, url).headers(headers);
        if !options.query.is_empty() {
            req = req.query(&options.query);
        }
        if let Some(body) = &options.body {
            req = req.json(body);
        }

        self.send(req).await
    }

    /// Upload a file through the multipart variant.
    ///
    /// Identical contract to [`request`](Self::request), except the body is
    /// a multipart form and no JSON content type is attached — the transport
    /// sets the multipart boundary type itself.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        file: FileUpload,
        options: RequestOptions,
    ) -> ApiResponse<T> {
        let url = self.url(path);
        debug!(%url, file = %file.file_name, "API upload");

        let headers = match self.build_headers(&options, false).await {
            Ok(headers) => headers,
            Err(message) => return ApiResponse::err(message),
        };

        let mut part = multipart::Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(content_type) = &file.content_type {
            part = match part.mime_str(content_type) {
                Ok(part) => part,
                Err(e) => return ApiResponse::err(format!("Invalid content type: {}", e)),
            };
        }
        let form = multipart::Form::new().part(file.field_name, part);

        let mut req = self
            .builder(options.method, url)
            .headers(headers)
            .multipart(form);
        if !options.query.is_empty() {
            req = req.query(&options.query);
        }

        self.send(req).await
    }

    // ─── Internal Helpers ──────────────────────────────────────

    pub(crate) fn url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let current = url.path().trim_end_matches('/').to_string();
        // path may carry its own query string (e.g. "/reports?status=final")
        if let Some(query_start) = path.find('?') {
            url.set_path(&format!("{}{}", current, &path[..query_start]));
            url.set_query(Some(&path[query_start + 1..]));
        } else {
            url.set_path(&format!("{}{}", current, path));
        }
        url
    }

    fn builder(&self, method: HttpMethod, url: Url) -> reqwest::RequestBuilder {
        match method {
            HttpMethod::Get => self.http.get(url),
            HttpMethod::Post => self.http.post(url),
            HttpMethod::Put => self.http.put(url),
            HttpMethod::Patch => self.http.patch(url),
            HttpMethod::Delete => self.http.delete(url),
        }
    }

    /// Default headers plus caller-supplied ones; callers win on conflict.
    async fn build_headers(
        &self,
        options: &RequestOptions,
        json_content_type: bool,
    ) -> Result<HeaderMap, String> {
        let mut headers = HeaderMap::new();
        if json_content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        if let Some(token) = self.bearer_token().await {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(e) => debug!("Skipping malformed bearer token: {}", e),
            }
        }

        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| format!("Invalid header name '{}': {}", name, e))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| format!("Invalid header value for '{}': {}", name, e))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    async fn bearer_token(&self) -> Option<String> {
        match self.auth.session().await {
            Ok(session) => session.map(|s| s.access_token),
            Err(e) => {
                debug!("Session lookup failed, sending unauthenticated: {}", e);
                None
            }
        }
    }

    async fn send<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> ApiResponse<T> {
        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => return ApiResponse::err(e.to_string()),
        };
        let status = resp.status().as_u16();
        let body = match resp.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return ApiResponse::err(e.to_string()),
        };
        self.finish(status, &body).await
    }

    /// Classify a response into the envelope, applying 401 side effects.
    ///
    /// Priority: 401 (sign-out + unauthorized broadcast, exactly once per
    /// failed request), then 204 (success, no body parse), then JSON parse,
    /// then status. Concurrent 401s each fire independently; sign-out is
    /// idempotent at the backend.
    async fn finish<T: DeserializeOwned>(&self, status: u16, body: &[u8]) -> ApiResponse<T> {
        if status == 401 {
            if let Err(e) = self.auth.sign_out().await {
                debug!("Sign-out after 401 failed: {}", e);
            }
            self.events.publish(AppEvent::Unauthorized);
            return ApiResponse::err("Authentication required");
        }

        if status == 204 {
            return ApiResponse::ok_empty();
        }

        let value: JsonValue = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => return ApiResponse::err(format!("Invalid response body: {}", e)),
        };

        if (200..300).contains(&status) {
            match serde_json::from_value(value) {
                Ok(data) => ApiResponse::ok(data),
                Err(e) => ApiResponse::err(format!("Invalid response body: {}", e)),
            }
        } else {
            let message = ErrorBody::from_value(&value).message_or_status(status);
            debug!(status, message = %message, "API error response");
            ApiResponse::err(message)
        }
    }
}
