//! Service-level tests for [`ProjectData`] against an in-memory row store.
//! The store behaves like the backend gateway: ids are assigned on insert,
//! updates merge patches, and a missing row is `NoRows`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};

use logframe_backend::{DataBackend, RowFilter};
use logframe_core::{BackendError, BackendResult};
use logframe_data::{
    ActivityUpdate, KpiUpdate, NewActivity, NewKpi, NewOutcome, NewReport, NewSubActivity,
    ProjectData,
};

struct InMemoryData {
    tables: Mutex<HashMap<String, Vec<JsonValue>>>,
    next_id: AtomicUsize,
}

impl InMemoryData {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            tables: Mutex::new(HashMap::new()),
            next_id: AtomicUsize::new(1),
        })
    }
}

#[async_trait]
impl DataBackend for InMemoryData {
    async fn insert(&self, table: &str, mut row: JsonValue) -> BackendResult<JsonValue> {
        let id = format!("row-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        if let Some(object) = row.as_object_mut() {
            object.insert("id".to_string(), json!(id));
        }
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn select(&self, table: &str, filter: RowFilter) -> BackendResult<Vec<JsonValue>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| filter.matches(r)).cloned().collect())
            .unwrap_or_default())
    }

    async fn update(&self, table: &str, id: &str, patch: JsonValue) -> BackendResult<JsonValue> {
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.get_mut(table).ok_or(BackendError::NoRows)?;
        let row = rows
            .iter_mut()
            .find(|r| r.get("id").and_then(JsonValue::as_str) == Some(id))
            .ok_or(BackendError::NoRows)?;
        if let (Some(target), Some(fields)) = (row.as_object_mut(), patch.as_object()) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(row.clone())
    }

    async fn delete(&self, table: &str, id: &str) -> BackendResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|r| r.get("id").and_then(JsonValue::as_str) != Some(id));
        }
        Ok(())
    }
}

fn service() -> (ProjectData, Arc<InMemoryData>) {
    let store = InMemoryData::new();
    (ProjectData::new(store.clone()), store)
}

#[tokio::test]
async fn create_outcome_scopes_to_project() {
    let (data, _) = service();
    let outcome = data
        .create_outcome(
            "p1",
            NewOutcome {
                title: "Improved literacy".into(),
                description: Some("Reading levels up a grade".into()),
                status: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(outcome.project_id, "p1");
    assert_eq!(outcome.title, "Improved literacy");
    assert!(!outcome.id.is_empty());
}

#[tokio::test]
async fn list_filters_by_project() {
    let (data, _) = service();
    data.create_outcome("p1", NewOutcome { title: "A".into(), ..Default::default() })
        .await
        .unwrap();
    data.create_outcome("p2", NewOutcome { title: "B".into(), ..Default::default() })
        .await
        .unwrap();

    let outcomes = data.outcomes("p1").await.unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].title, "A");
}

#[tokio::test]
async fn update_kpi_patches_only_given_fields() {
    let (data, _) = service();
    let kpi = data
        .create_kpi(
            "p1",
            NewKpi {
                name: "Attendance rate".into(),
                unit: Some("%".into()),
                target: Some(95.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let updated = data
        .update_kpi(&kpi.id, KpiUpdate { actual: Some(87.5), ..Default::default() })
        .await
        .unwrap();

    assert_eq!(updated.actual, Some(87.5));
    // untouched fields survive the patch
    assert_eq!(updated.unit.as_deref(), Some("%"));
    assert_eq!(updated.target, Some(95.0));
}

#[tokio::test]
async fn update_missing_row_is_no_rows() {
    let (data, _) = service();
    let err = data
        .update_activity("nope", ActivityUpdate { status: Some("done".into()), ..Default::default() })
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::NoRows));
}

#[tokio::test]
async fn delete_report_removes_the_row() {
    let (data, _) = service();
    let report = data
        .create_report("p1", NewReport { title: "Q1 report".into(), ..Default::default() })
        .await
        .unwrap();

    data.delete_report(&report.id).await.unwrap();
    assert!(data.reports("p1").await.unwrap().is_empty());
}

#[tokio::test]
async fn sub_activity_keeps_its_parent_link() {
    let (data, _) = service();
    let activity = data
        .create_activity("p1", NewActivity { title: "Teacher training".into(), ..Default::default() })
        .await
        .unwrap();

    let sub = data
        .create_sub_activity(
            "p1",
            NewSubActivity {
                activity_id: activity.id.clone(),
                title: "Book venue".into(),
                status: None,
                due_date: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(sub.activity_id, activity.id);
    assert_eq!(sub.project_id, "p1");
}

#[tokio::test]
async fn rows_come_back_exactly_as_stored() {
    let (data, store) = service();
    let outcome = data
        .create_outcome(
            "p1",
            NewOutcome { title: "A".into(), status: Some("on_track".into()), ..Default::default() },
        )
        .await
        .unwrap();

    let stored = store.tables.lock().unwrap().get("outcomes").unwrap()[0].clone();
    assert_eq!(stored.get("id").and_then(JsonValue::as_str), Some(outcome.id.as_str()));
    assert_eq!(stored.get("status").and_then(JsonValue::as_str), Some("on_track"));
}
