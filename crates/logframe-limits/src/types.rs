use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use logframe_core::BackendResult;

use crate::metric::UsageMetric;

/// Usage standing for one metric, as the subscription service reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStatus {
    pub current_usage: i64,
    pub limit: i64,
    pub is_unlimited: bool,
}

/// Usage-limit query collaborator.
///
/// Backed by the subscription service; the translator treats a lookup
/// failure as "standing unknown" and falls back to a generic message.
#[async_trait]
pub trait UsageLookup: Send + Sync {
    async fn usage_status(&self, metric: UsageMetric) -> BackendResult<UsageStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_status_uses_camel_case() {
        let status: UsageStatus =
            serde_json::from_str(r#"{"currentUsage":5,"limit":5,"isUnlimited":false}"#).unwrap();
        assert_eq!(
            status,
            UsageStatus { current_usage: 5, limit: 5, is_unlimited: false }
        );

        let text = serde_json::to_string(&status).unwrap();
        assert_eq!(text, r#"{"currentUsage":5,"limit":5,"isUnlimited":false}"#);
    }
}
