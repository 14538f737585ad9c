//! Authenticated HTTP request wrapper for the Logframe API.
//!
//! [`ApiClient`] issues requests against the configured base URL, injecting
//! the current bearer token from the auth backend, and normalizes every
//! outcome — transport failures included — into the
//! [`ApiResponse`](logframe_core::ApiResponse) envelope. A 401 response
//! forces a sign-out and broadcasts
//! [`AppEvent::Unauthorized`](logframe_core::AppEvent::Unauthorized) for
//! interested listeners.
//!
//! # Usage
//!
//! ```ignore
//! use logframe_http::{ApiClient, RequestOptions};
//! use logframe_core::{ApiConfig, EventBus};
//!
//! let client = ApiClient::new(ApiConfig::new("https://api.logframe.app"), auth, EventBus::default())?;
//! let report: ApiResponse<Report> = client.get("/projects/p1/reports/r1").await;
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiClientError;
pub use types::{ErrorBody, FileUpload, HttpMethod, RequestOptions};
