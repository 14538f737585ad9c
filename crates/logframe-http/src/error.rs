/// Errors from constructing an [`ApiClient`](crate::ApiClient).
///
/// Request execution never returns a `Result`: every outcome of a sent
/// request is normalized into the response envelope instead.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
