use std::future::Future;

use tracing::debug;

use logframe_core::{BackendError, BackendResult, DbError};

use crate::metric::{OperationKind, UsageMetric};
use crate::types::{UsageLookup, UsageStatus};

/// SQLSTATE for insufficient privilege; what a row-level security policy
/// rejection reports.
const INSUFFICIENT_PRIVILEGE: &str = "42501";
/// SQLSTATE for unique violations; per-tenant limit tables enforce caps
/// through unique constraints.
const UNIQUE_VIOLATION: &str = "23505";

/// Substrings identifying a policy rejection when the code is missing or
/// nonstandard. Matched against the lower-cased message, details, and hint.
const POLICY_MARKERS: [&str; 3] = ["policy", "permission denied", "row-level security"];

/// Rewrite a backend error into a user-facing subscription message when it
/// indicates a policy or uniqueness violation.
///
/// Any other error — including database errors with unrecognized codes —
/// passes through unchanged.
pub async fn translate_limit_error(
    err: BackendError,
    metric: UsageMetric,
    kind: OperationKind,
    lookup: &dyn UsageLookup,
) -> BackendError {
    let Some(fields) = err.db_fields() else {
        return err;
    };

    if is_policy_violation(fields) {
        debug!(%metric, "Translating policy violation into a quota message");
        let message = match lookup.usage_status(metric).await {
            Ok(status) => policy_message(metric, kind, &status),
            Err(lookup_err) => {
                debug!(%metric, "Usage lookup failed: {}", lookup_err);
                generic_message()
            }
        };
        return BackendError::SubscriptionLimit(message);
    }

    if fields.code.as_deref() == Some(UNIQUE_VIOLATION) {
        debug!(%metric, "Translating unique violation into a quota message");
        return BackendError::SubscriptionLimit(unique_message(metric, kind));
    }

    err
}

/// Run a mutation and, on failure, re-raise the translated error.
///
/// Opt-in per call site; operations that cannot hit subscription limits
/// should not pay the lookup.
pub async fn with_limit_translation<T, F>(
    metric: UsageMetric,
    kind: OperationKind,
    lookup: &dyn UsageLookup,
    operation: F,
) -> BackendResult<T>
where
    F: Future<Output = BackendResult<T>>,
{
    match operation.await {
        Ok(value) => Ok(value),
        Err(err) => Err(translate_limit_error(err, metric, kind, lookup).await),
    }
}

fn is_policy_violation(fields: &DbError) -> bool {
    if fields.code.as_deref() == Some(INSUFFICIENT_PRIVILEGE) {
        return true;
    }
    [&fields.message, &fields.details, &fields.hint]
        .into_iter()
        .flatten()
        .any(|text| {
            let text = text.to_lowercase();
            POLICY_MARKERS.iter().any(|marker| text.contains(marker))
        })
}

fn policy_message(metric: UsageMetric, kind: OperationKind, status: &UsageStatus) -> String {
    if status.is_unlimited {
        format!(
            "Your plan allows unlimited {}, but this action was blocked by a \
             subscription policy. Please contact support.",
            metric.display_name()
        )
    } else {
        format!(
            "You've reached your {} limit ({}/{}). Please upgrade your plan to {}.",
            metric.display_name(),
            status.current_usage,
            status.limit,
            action_phrase(metric, kind)
        )
    }
}

fn unique_message(metric: UsageMetric, kind: OperationKind) -> String {
    format!(
        "You've reached the maximum number of {} on your current plan. \
         Please upgrade your plan to {}.",
        metric.display_name(),
        action_phrase(metric, kind)
    )
}

fn generic_message() -> String {
    "This action is restricted by your current subscription limits. \
     Please upgrade your plan or contact support."
        .to_string()
}

fn action_phrase(metric: UsageMetric, kind: OperationKind) -> String {
    match kind {
        OperationKind::Create => format!("add more {}", metric.display_name()),
        OperationKind::Update => "make further changes".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;

    /// Lookup double: serves a fixed status or fails, recording queries.
    struct StubLookup {
        status: Option<UsageStatus>,
        queries: Mutex<Vec<UsageMetric>>,
    }

    impl StubLookup {
        fn with_status(status: UsageStatus) -> Self {
            Self {
                status: Some(status),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                status: None,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl UsageLookup for StubLookup {
        async fn usage_status(&self, metric: UsageMetric) -> BackendResult<UsageStatus> {
            self.queries.lock().unwrap().push(metric);
            self.status
                .clone()
                .ok_or_else(|| BackendError::other("subscription service unavailable"))
        }
    }

    fn db_error(code: Option<&str>, message: Option<&str>) -> BackendError {
        BackendError::Database(DbError {
            code: code.map(str::to_owned),
            message: message.map(str::to_owned),
            details: None,
            hint: None,
        })
    }

    #[tokio::test]
    async fn unique_violation_names_the_metric() {
        let lookup = StubLookup::failing();
        let err = translate_limit_error(
            db_error(Some("23505"), None),
            UsageMetric::Forms,
            OperationKind::Create,
            &lookup,
        )
        .await;

        let message = err.to_string();
        assert!(message.contains("forms"), "message was: {message}");
        assert!(message.contains("upgrade your plan"), "message was: {message}");
        // unique violations never consult the lookup
        assert!(lookup.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn policy_violation_reports_usage_standing() {
        let lookup = StubLookup::with_status(UsageStatus {
            current_usage: 5,
            limit: 5,
            is_unlimited: false,
        });
        let err = translate_limit_error(
            db_error(Some("42501"), Some("row-level security")),
            UsageMetric::Projects,
            OperationKind::Create,
            &lookup,
        )
        .await;

        let message = err.to_string();
        assert!(message.contains("5/5"), "message was: {message}");
        assert_eq!(lookup.queries.lock().unwrap().as_slice(), [UsageMetric::Projects]);
    }

    #[tokio::test]
    async fn policy_violation_detected_from_message_text_alone() {
        let lookup = StubLookup::with_status(UsageStatus {
            current_usage: 2,
            limit: 3,
            is_unlimited: false,
        });
        let err = translate_limit_error(
            db_error(None, Some("new row violates Row-Level Security for table \"kpis\"")),
            UsageMetric::Kpis,
            OperationKind::Create,
            &lookup,
        )
        .await;
        assert!(matches!(err, BackendError::SubscriptionLimit(_)));
    }

    #[tokio::test]
    async fn policy_violation_detected_from_details_and_hint() {
        let fields = DbError {
            code: None,
            message: None,
            details: Some("permission denied for relation reports".into()),
            hint: None,
        };
        assert!(is_policy_violation(&fields));

        let fields = DbError {
            code: None,
            message: None,
            details: None,
            hint: Some("check the table POLICY".into()),
        };
        assert!(is_policy_violation(&fields));
    }

    #[tokio::test]
    async fn unlimited_plans_get_a_support_message() {
        let lookup = StubLookup::with_status(UsageStatus {
            current_usage: 120,
            limit: 0,
            is_unlimited: true,
        });
        let err = translate_limit_error(
            db_error(Some("42501"), None),
            UsageMetric::Reports,
            OperationKind::Create,
            &lookup,
        )
        .await;

        let message = err.to_string();
        assert!(message.contains("unlimited reports"), "message was: {message}");
        assert!(message.contains("contact support"), "message was: {message}");
    }

    #[tokio::test]
    async fn failed_lookup_falls_back_to_generic_message() {
        let lookup = StubLookup::failing();
        let err = translate_limit_error(
            db_error(Some("42501"), None),
            UsageMetric::Outcomes,
            OperationKind::Create,
            &lookup,
        )
        .await;

        let message = err.to_string();
        assert!(message.contains("subscription limits"), "message was: {message}");
    }

    #[tokio::test]
    async fn unrecognized_errors_pass_through_unchanged() {
        let lookup = StubLookup::failing();

        let err = translate_limit_error(
            BackendError::other("disk full"),
            UsageMetric::Forms,
            OperationKind::Create,
            &lookup,
        )
        .await;
        assert_eq!(err.to_string(), "Backend error: disk full");

        // database errors with unrecognized codes stay intact too
        let err = translate_limit_error(
            db_error(Some("23503"), Some("foreign key violation")),
            UsageMetric::Forms,
            OperationKind::Update,
            &lookup,
        )
        .await;
        assert_eq!(err.to_string(), "23503: foreign key violation");
        assert!(lookup.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn with_limit_translation_translates_on_failure_only() {
        let lookup = StubLookup::failing();

        let ok = with_limit_translation(
            UsageMetric::Forms,
            OperationKind::Create,
            &lookup,
            async { Ok::<_, BackendError>(7) },
        )
        .await;
        assert_eq!(ok.unwrap(), 7);

        let err = with_limit_translation(
            UsageMetric::Forms,
            OperationKind::Create,
            &lookup,
            async { Err::<i32, _>(db_error(Some("23505"), None)) },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("upgrade your plan"));
    }

    #[tokio::test]
    async fn update_operations_get_an_update_phrase() {
        let lookup = StubLookup::with_status(UsageStatus {
            current_usage: 10,
            limit: 10,
            is_unlimited: false,
        });
        let err = translate_limit_error(
            db_error(Some("42501"), None),
            UsageMetric::Forms,
            OperationKind::Update,
            &lookup,
        )
        .await;
        assert!(err.to_string().contains("make further changes"));
    }
}
