use async_trait::async_trait;
use serde_json::Value as JsonValue;

use logframe_core::BackendResult;

/// Equality filter set for row selection.
///
/// A reduced filter surface: the facades in this workspace only ever scope
/// rows by parent identifiers, so equality conditions are all that is
/// carried across the seam.
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    conditions: Vec<(String, JsonValue)>,
}

impl RowFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an `column = value` condition.
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.conditions.push((column.into(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, JsonValue)] {
        &self.conditions
    }

    /// Whether a row object satisfies every condition.
    ///
    /// Convenience for in-memory implementations; HTTP implementations
    /// render the conditions into gateway query parameters instead.
    pub fn matches(&self, row: &JsonValue) -> bool {
        self.conditions
            .iter()
            .all(|(column, value)| row.get(column) == Some(value))
    }
}

/// Table-level row CRUD of the backend data gateway.
///
/// Rows cross the seam as raw JSON objects; the typed facades own
/// (de)serialization. Row-level security is enforced behind this seam, so
/// policy violations surface as database errors, not as filtered results.
#[async_trait]
pub trait DataBackend: Send + Sync {
    /// Insert a row and return it as stored.
    async fn insert(&self, table: &str, row: JsonValue) -> BackendResult<JsonValue>;

    /// Select all rows matching the filter.
    async fn select(&self, table: &str, filter: RowFilter) -> BackendResult<Vec<JsonValue>>;

    /// Update the row with the given id and return it as stored.
    ///
    /// Implementations report [`BackendError::NoRows`] when no row matched.
    ///
    /// [`BackendError::NoRows`]: logframe_core::BackendError::NoRows
    async fn update(&self, table: &str, id: &str, patch: JsonValue) -> BackendResult<JsonValue>;

    /// Delete the row with the given id.
    async fn delete(&self, table: &str, id: &str) -> BackendResult<()>;

    /// Select the single row with the given id, if it exists.
    async fn select_by_id(&self, table: &str, id: &str) -> BackendResult<Option<JsonValue>> {
        let mut rows = self.select(table, RowFilter::new().eq("id", id)).await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.remove(0)))
        }
    }
}
