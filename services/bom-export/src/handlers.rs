//! BOM Export Handlers
//!
//! HTTP surface of the export service. Reports are returned as CSV attachments;
//! whole-operation failures as a JSON `ErrorResponse`.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use cpq_models::{BatchExportRequest, FlatRow};
use cpq_utils::bom::{flatten_document, BomWriter};
use cpq_utils::{log_error, ConsoleError, ErrorResponse};
use serde::Serialize;
use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::AppState;

/// Whole-operation failure rendered with the error's own status code.
#[derive(Debug)]
pub struct ApiError(pub ConsoleError);

impl From<ConsoleError> for ApiError {
    fn from(error: ConsoleError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "cpq-bom-export",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> String {
    state.metrics.render()
}

/// Export the BOM of one segment item
///
/// GET /api/v1/bom/segment-items/:segment_item_id/export
pub async fn export_segment_item(
    State(state): State<AppState>,
    Path(segment_item_id): Path<String>,
) -> Result<Response, ApiError> {
    let export = match state.service.export_single(&segment_item_id).await {
        Ok(export) => export,
        Err(error) => {
            log_error!(error, "BOM export failed for segment item {}", segment_item_id);
            state.metrics.record_failure("single");
            return Err(error.into());
        }
    };

    let csv = writer(&state).rows_to_bytes(&export.rows)?;
    state.metrics.record_success("single", export.rows.len(), 0);
    info!(
        segment_item_id = %export.segment_item_id,
        segment_item_name = %export.segment_item_name,
        "Serving BOM report"
    );

    let filename = format!("{}_{}.csv", state.config.export.filename_prefix, sanitize(&export.segment_item_id));
    Ok(csv_attachment(&filename, csv))
}

/// Export the BOMs of many segment items into one report
///
/// POST /api/v1/bom/export
pub async fn export_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchExportRequest>,
) -> Result<Response, ApiError> {
    request
        .validate()
        .map_err(|e| ConsoleError::validation("segmentItemIds", e.to_string()))?;

    let report = match state.service.export_batch(&request.segment_item_ids).await {
        Ok(report) => report,
        Err(error) => {
            log_error!(error, "BOM batch export of {} segment items failed", request.segment_item_ids.len());
            state.metrics.record_failure("batch");
            return Err(error.into());
        }
    };

    let csv = writer(&state).batch_to_bytes(&report.rows)?;
    state.metrics.record_success("batch", report.rows.len(), report.failed);

    let filename = format!("{}_batch.csv", state.config.export.filename_prefix);
    Ok(csv_attachment(&filename, csv))
}

#[derive(Debug, Serialize)]
pub struct FlattenResponse {
    pub total_rows: usize,
    pub rows: Vec<FlatRow>,
}

/// Flatten a configuration document supplied by the caller
///
/// POST /api/v1/bom/flatten
pub async fn flatten_configuration(
    Json(document): Json<serde_json::Value>,
) -> Result<Json<FlattenResponse>, ApiError> {
    let rows = flatten_document(document)?;
    Ok(Json(FlattenResponse {
        total_rows: rows.len(),
        rows,
    }))
}

fn writer(state: &AppState) -> BomWriter {
    BomWriter::with_delimiter(state.config.export.delimiter)
}

fn csv_attachment(filename: &str, body: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
        ],
        body,
    )
        .into_response()
}

fn sanitize(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
