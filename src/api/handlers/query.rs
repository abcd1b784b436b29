use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::response::{ApiError, AppQuery};
use crate::storage::{QueryTable, Record};
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    pub table_name: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub data: Vec<Record>,
}

// ============================================================================
// Handler
// ============================================================================

/// Fetch all rows of an allowlisted table matching a status value.
///
/// Zero matches is not an error: the response is `{"data": []}`.
pub async fn query_data(
    State(state): State<Arc<AppState>>,
    AppQuery(params): AppQuery<QueryParams>,
) -> Result<Json<QueryResponse>, ApiError> {
    let table = QueryTable::parse(&params.table_name)
        .ok_or_else(|| ApiError::bad_request("Invalid table name"))?;

    let data = state
        .db
        .select_by_status(table, &params.status)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    tracing::debug!(table = table.name(), rows = data.len(), "Ran status query");

    Ok(Json(QueryResponse { data }))
}
