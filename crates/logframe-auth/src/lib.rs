//! Auth facade for the Logframe client SDK.
//!
//! [`AuthService`] adapts the backend auth gateway and the `profiles` table
//! to the call conventions the application expects: UI-facing operations
//! return the [`ApiResponse`](logframe_core::ApiResponse) envelope and never
//! propagate backend errors, while collaborator pass-throughs (`session`,
//! `on_auth_state_change`) keep their `Result` shape.
//!
//! # Usage
//!
//! ```ignore
//! use logframe_auth::AuthService;
//!
//! let auth = AuthService::new(auth_backend, data_backend);
//! let result = auth.login("user@example.com", "password").await;
//! if result.is_ok() {
//!     let data = result.data.unwrap();
//!     println!("signed in as {}", data.user.email);
//! }
//! ```

pub mod service;
pub mod types;

pub use service::AuthService;
pub use types::{AuthData, ProfileUpdate};
