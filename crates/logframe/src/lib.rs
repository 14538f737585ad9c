// Re-export core (always available)
pub use logframe_core::*;

// The backend collaborator seam is part of the public surface: applications
// supply the implementations the facades run on.
pub use logframe_backend;

#[cfg(feature = "http")]
pub use logframe_http;

#[cfg(feature = "auth")]
pub use logframe_auth;

#[cfg(feature = "data")]
pub use logframe_data;

#[cfg(feature = "limits")]
pub use logframe_limits;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use logframe::prelude::*;
/// ```
pub mod prelude {
    pub use logframe_core::{
        ApiConfig, ApiResponse, AppEvent, BackendError, BackendResult, DbError, EventBus,
    };

    pub use logframe_backend::{
        AuthBackend, AuthChangeEvent, AuthStateCallback, AuthSubscription, AuthUser,
        DataBackend, Profile, RowFilter, Session, SignInResponse, UpdateUserParams,
    };

    #[cfg(feature = "http")]
    pub use logframe_http::{ApiClient, ApiClientError, FileUpload, HttpMethod, RequestOptions};

    #[cfg(feature = "auth")]
    pub use logframe_auth::{AuthData, AuthService, ProfileUpdate};

    #[cfg(feature = "data")]
    pub use logframe_data::{
        Activity, ActivityUpdate, Kpi, KpiUpdate, NewActivity, NewKpi, NewOutcome, NewOutput,
        NewReport, NewSubActivity, Outcome, OutcomeUpdate, Output, OutputUpdate, ProjectData,
        Report, ReportUpdate, SubActivity, SubActivityUpdate,
    };

    #[cfg(feature = "limits")]
    pub use logframe_limits::{
        translate_limit_error, with_limit_translation, OperationKind, UsageLookup, UsageMetric,
        UsageStatus,
    };
}
