use std::fmt;

use serde::{Deserialize, Serialize};

/// Countable resources subject to subscription-tier limits.
///
/// The `Display` form is the metric identifier the subscription service
/// understands; [`display_name`](Self::display_name) is what quota messages
/// show to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageMetric {
    Projects,
    Forms,
    Outcomes,
    Outputs,
    Activities,
    SubActivities,
    Kpis,
    Reports,
    TeamMembers,
}

impl UsageMetric {
    /// Human-readable name used in quota messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Forms => "forms",
            Self::Outcomes => "outcomes",
            Self::Outputs => "outputs",
            Self::Activities => "activities",
            Self::SubActivities => "sub-activities",
            Self::Kpis => "KPIs",
            Self::Reports => "reports",
            Self::TeamMembers => "team members",
        }
    }
}

impl fmt::Display for UsageMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Projects => write!(f, "projects"),
            Self::Forms => write!(f, "forms"),
            Self::Outcomes => write!(f, "outcomes"),
            Self::Outputs => write!(f, "outputs"),
            Self::Activities => write!(f, "activities"),
            Self::SubActivities => write!(f, "sub_activities"),
            Self::Kpis => write!(f, "kpis"),
            Self::Reports => write!(f, "reports"),
            Self::TeamMembers => write!(f, "team_members"),
        }
    }
}

/// Whether the failed mutation was creating or updating a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Create,
    Update,
}
