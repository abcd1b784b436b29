use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::ingest::{Dataset, IngestError};
use crate::storage::DatabaseError;
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct UploadReceipt {
    pub message: String,
    pub table: String,
}

#[derive(Debug, Serialize)]
pub struct UploadFault {
    pub error: String,
}

#[derive(Debug, Error)]
enum UploadError {
    #[error("invalid multipart data: {0}")]
    Multipart(String),
    #[error("file field is required")]
    MissingFile,
    #[error("uploaded file has no file name")]
    MissingFileName,
    #[error("{0}")]
    Parse(#[from] IngestError),
    #[error("{0}")]
    Write(#[from] DatabaseError),
}

// ============================================================================
// Handler
// ============================================================================

/// Load an uploaded CSV into the table named after the file.
///
/// The destination table is a destructive overwrite: any existing table
/// with the same name is dropped, schema and all, before the new rows are
/// written. There is no confirmation step.
///
/// Always responds HTTP 200. Success carries `{"message", "table"}`;
/// any failure carries `{"error"}` — callers must inspect the body shape.
pub async fn upload_data(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    match load_upload(&state, multipart).await {
        Ok(receipt) => Json(receipt).into_response(),
        Err(e) => Json(UploadFault {
            error: e.to_string(),
        })
        .into_response(),
    }
}

async fn load_upload(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<UploadReceipt, UploadError> {
    let mut payload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or(UploadError::MissingFileName)?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| UploadError::Multipart(e.to_string()))?;
                payload = Some((file_name, data));
            }
            _ => {
                // Ignore unknown fields
            }
        }
    }

    let (file_name, data) = payload.ok_or(UploadError::MissingFile)?;

    // Parse fully before touching the store, so a malformed file never
    // mutates any table.
    let dataset = Dataset::parse(&file_name, &data)?;
    let rows = state.db.replace_table(&dataset).await?;

    tracing::info!(file = %file_name, table = %dataset.table, rows, "Replaced table from upload");

    Ok(UploadReceipt {
        message: format!("Data from {file_name} uploaded successfully!"),
        table: dataset.table,
    })
}
