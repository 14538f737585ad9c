//! Backend collaborator seam for the Logframe client SDK.
//!
//! The authentication and row-storage service behind the application is an
//! external black box (a Supabase-style stack: GoTrue auth in front of
//! Postgres with row-level security). This crate defines the traits the
//! facades delegate to — [`AuthBackend`] for session/identity operations and
//! [`DataBackend`] for table-level row CRUD — together with the types both
//! sides exchange. Facades receive `Arc<dyn …>` implementations at
//! construction; nothing in this workspace holds a singleton.

pub mod auth;
pub mod data;
pub mod params;
pub mod types;

pub use auth::{AuthBackend, AuthStateCallback, AuthSubscription};
pub use data::{DataBackend, RowFilter};
pub use params::UpdateUserParams;
pub use types::{AuthChangeEvent, AuthUser, Profile, Session, SignInResponse};
