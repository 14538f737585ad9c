//! Show how backend policy and uniqueness errors become quota messages.
//!
//! Run with: cargo run --example quota_errors

use async_trait::async_trait;
use serde_json::json;

use logframe::prelude::*;

/// Subscription-service stand-in with a fixed standing per metric.
struct DemoLookup;

#[async_trait]
impl UsageLookup for DemoLookup {
    async fn usage_status(&self, metric: UsageMetric) -> BackendResult<UsageStatus> {
        match metric {
            UsageMetric::Projects => Ok(UsageStatus {
                current_usage: 5,
                limit: 5,
                is_unlimited: false,
            }),
            _ => Err(BackendError::other("subscription service unavailable")),
        }
    }
}

#[tokio::main]
async fn main() {
    let lookup = DemoLookup;

    // A row-level security rejection, as the REST gateway reports it.
    let policy_payload = json!({
        "code": "42501",
        "message": "new row violates row-level security policy for table \"projects\""
    });
    let err = BackendError::Database(DbError::from_value(&policy_payload));
    let translated =
        translate_limit_error(err, UsageMetric::Projects, OperationKind::Create, &lookup).await;
    println!("policy violation -> {translated}");

    // A unique violation from a per-tenant cap table.
    let err = BackendError::Database(DbError::from_value(&json!({ "code": "23505" })));
    let translated =
        translate_limit_error(err, UsageMetric::Forms, OperationKind::Create, &lookup).await;
    println!("unique violation -> {translated}");

    // Anything else passes through unchanged.
    let err = BackendError::other("disk full");
    let translated =
        translate_limit_error(err, UsageMetric::Forms, OperationKind::Create, &lookup).await;
    println!("unrelated error  -> {translated}");
}
