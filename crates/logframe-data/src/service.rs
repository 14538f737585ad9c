use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use logframe_backend::{DataBackend, RowFilter};
use logframe_core::BackendResult;

use crate::types::*;

/// Backend table names for the project sub-entities.
pub mod tables {
    pub const OUTCOMES: &str = "outcomes";
    pub const OUTPUTS: &str = "outputs";
    pub const ACTIVITIES: &str = "activities";
    pub const SUB_ACTIVITIES: &str = "sub_activities";
    pub const KPIS: &str = "kpis";
    pub const REPORTS: &str = "reports";
}

/// Typed CRUD facade over the backend data gateway.
///
/// Every operation is a direct proxy: serialize, delegate, deserialize.
/// Row-level security decides what the caller may touch; violations come
/// back as database errors for the limits translator to interpret.
#[derive(Clone)]
pub struct ProjectData {
    backend: Arc<dyn DataBackend>,
}

impl ProjectData {
    pub fn new(backend: Arc<dyn DataBackend>) -> Self {
        Self { backend }
    }

    // ─── Outcomes ──────────────────────────────────────────────

    pub async fn outcomes(&self, project_id: &str) -> BackendResult<Vec<Outcome>> {
        self.list_rows(tables::OUTCOMES, project_id).await
    }

    pub async fn create_outcome(
        &self,
        project_id: &str,
        outcome: NewOutcome,
    ) -> BackendResult<Outcome> {
        self.create_row(tables::OUTCOMES, project_id, outcome).await
    }

    pub async fn update_outcome(&self, id: &str, patch: OutcomeUpdate) -> BackendResult<Outcome> {
        self.update_row(tables::OUTCOMES, id, patch).await
    }

    pub async fn delete_outcome(&self, id: &str) -> BackendResult<()> {
        self.backend.delete(tables::OUTCOMES, id).await
    }

    // ─── Outputs ───────────────────────────────────────────────

    pub async fn outputs(&self, project_id: &str) -> BackendResult<Vec<Output>> {
        self.list_rows(tables::OUTPUTS, project_id).await
    }

    pub async fn create_output(&self, project_id: &str, output: NewOutput) -> BackendResult<Output> {
        self.create_row(tables::OUTPUTS, project_id, output).await
    }

    pub async fn update_output(&self, id: &str, patch: OutputUpdate) -> BackendResult<Output> {
        self.update_row(tables::OUTPUTS, id, patch).await
    }

    pub async fn delete_output(&self, id: &str) -> BackendResult<()> {
        self.backend.delete(tables::OUTPUTS, id).await
    }

    // ─── Activities ────────────────────────────────────────────

    pub async fn activities(&self, project_id: &str) -> BackendResult<Vec<Activity>> {
        self.list_rows(tables::ACTIVITIES, project_id).await
    }

    pub async fn create_activity(
        &self,
        project_id: &str,
        activity: NewActivity,
    ) -> BackendResult<Activity> {
        self.create_row(tables::ACTIVITIES, project_id, activity).await
    }

    pub async fn update_activity(&self, id: &str, patch: ActivityUpdate) -> BackendResult<Activity> {
        self.update_row(tables::ACTIVITIES, id, patch).await
    }

    pub async fn delete_activity(&self, id: &str) -> BackendResult<()> {
        self.backend.delete(tables::ACTIVITIES, id).await
    }

    // ─── Sub-Activities ────────────────────────────────────────

    pub async fn sub_activities(&self, project_id: &str) -> BackendResult<Vec<SubActivity>> {
        self.list_rows(tables::SUB_ACTIVITIES, project_id).await
    }

    pub async fn create_sub_activity(
        &self,
        project_id: &str,
        sub_activity: NewSubActivity,
    ) -> BackendResult<SubActivity> {
        self.create_row(tables::SUB_ACTIVITIES, project_id, sub_activity)
            .await
    }

    pub async fn update_sub_activity(
        &self,
        id: &str,
        patch: SubActivityUpdate,
    ) -> BackendResult<SubActivity> {
        self.update_row(tables::SUB_ACTIVITIES, id, patch).await
    }

    pub async fn delete_sub_activity(&self, id: &str) -> BackendResult<()> {
        self.backend.delete(tables::SUB_ACTIVITIES, id).await
    }

    // ─── KPIs ──────────────────────────────────────────────────

    pub async fn kpis(&self, project_id: &str) -> BackendResult<Vec<Kpi>> {
        self.list_rows(tables::KPIS, project_id).await
    }

    pub async fn create_kpi(&self, project_id: &str, kpi: NewKpi) -> BackendResult<Kpi> {
        self.create_row(tables::KPIS, project_id, kpi).await
    }

    pub async fn update_kpi(&self, id: &str, patch: KpiUpdate) -> BackendResult<Kpi> {
        self.update_row(tables::KPIS, id, patch).await
    }

    pub async fn delete_kpi(&self, id: &str) -> BackendResult<()> {
        self.backend.delete(tables::KPIS, id).await
    }

    // ─── Reports ───────────────────────────────────────────────

    pub async fn reports(&self, project_id: &str) -> BackendResult<Vec<Report>> {
        self.list_rows(tables::REPORTS, project_id).await
    }

    pub async fn create_report(&self, project_id: &str, report: NewReport) -> BackendResult<Report> {
        self.create_row(tables::REPORTS, project_id, report).await
    }

    pub async fn update_report(&self, id: &str, patch: ReportUpdate) -> BackendResult<Report> {
        self.update_row(tables::REPORTS, id, patch).await
    }

    pub async fn delete_report(&self, id: &str) -> BackendResult<()> {
        self.backend.delete(tables::REPORTS, id).await
    }

    // ─── Internal Helpers ──────────────────────────────────────

    async fn list_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        project_id: &str,
    ) -> BackendResult<Vec<T>> {
        let rows = self
            .backend
            .select(table, RowFilter::new().eq("project_id", project_id))
            .await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(Into::into))
            .collect()
    }

    async fn create_row<T: DeserializeOwned, P: Serialize>(
        &self,
        table: &str,
        project_id: &str,
        payload: P,
    ) -> BackendResult<T> {
        let mut row = serde_json::to_value(payload)?;
        if let Some(object) = row.as_object_mut() {
            object.insert("project_id".to_string(), json!(project_id));
        }
        debug!(table, project_id, "Creating row");
        let stored = self.backend.insert(table, row).await?;
        serde_json::from_value(stored).map_err(Into::into)
    }

    async fn update_row<T: DeserializeOwned, P: Serialize>(
        &self,
        table: &str,
        id: &str,
        patch: P,
    ) -> BackendResult<T> {
        let patch = serde_json::to_value(patch)?;
        debug!(table, id, "Updating row");
        let stored = self.backend.update(table, id, patch).await?;
        serde_json::from_value(stored).map_err(Into::into)
    }
}
