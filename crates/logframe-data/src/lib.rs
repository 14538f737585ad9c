//! Typed project-resource CRUD for the Logframe client SDK.
//!
//! [`ProjectData`] is a pure pass-through facade: each operation maps one
//! business entity (outcome, output, activity, sub-activity, KPI, report)
//! onto its backend table, serializes the payload, and returns exactly what
//! the backend returned. No batching, pagination, or caching happens here —
//! rows are read fresh per call and never retained.
//!
//! Errors surface as [`BackendError`](logframe_core::BackendError) so call
//! sites can opt into subscription-limit translation on mutations.

pub mod service;
pub mod types;

pub use service::{tables, ProjectData};
pub use types::*;
