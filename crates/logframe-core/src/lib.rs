//! Shared foundation for the Logframe client SDK.
//!
//! Provides the pieces every other crate in the workspace builds on: API
//! configuration, the `{success, data?, error?}` response envelope, the
//! backend error types (including normalized database error fields), and the
//! application event bus used for the unauthorized broadcast.

pub mod config;
pub mod error;
pub mod events;
pub mod response;

pub use config::ApiConfig;
pub use error::{BackendError, BackendResult, DbError};
pub use events::{AppEvent, EventBus};
pub use response::ApiResponse;
