use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers::*, AppState};

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .route("/bom/segment-items/:segment_item_id/export", get(export_segment_item))
        .route("/bom/export", post(export_batch))
        .route("/bom/flatten", post(flatten_configuration))
}
