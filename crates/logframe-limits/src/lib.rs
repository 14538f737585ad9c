//! Subscription-limit error translation for the Logframe client SDK.
//!
//! Mutations rejected by the backend's row-level security policies or by
//! unique constraints usually mean the caller's subscription tier ran out of
//! headroom. [`translate_limit_error`] inspects the database error fields
//! and rewrites those two cases into a user-facing quota message — naming
//! the metric and, when the usage lookup succeeds, the exact standing —
//! while every other error passes through untouched.
//!
//! Call sites opt in per mutation via [`with_limit_translation`]:
//!
//! ```ignore
//! use logframe_limits::{with_limit_translation, OperationKind, UsageMetric};
//!
//! let outcome = with_limit_translation(
//!     UsageMetric::Outcomes,
//!     OperationKind::Create,
//!     &lookup,
//!     data.create_outcome("p1", new_outcome),
//! )
//! .await?;
//! ```

pub mod metric;
pub mod translate;
pub mod types;

pub use metric::{OperationKind, UsageMetric};
pub use translate::{translate_limit_error, with_limit_translation};
pub use types::{UsageLookup, UsageStatus};
