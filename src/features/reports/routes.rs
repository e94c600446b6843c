use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::reports::handlers::submit_complaint;
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature
pub fn routes(report_service: Arc<ReportService>, max_request_body_size: usize) -> Router {
    Router::new()
        .route(
            "/submit_complaint",
            post(submit_complaint).layer(DefaultBodyLimit::max(max_request_body_size)),
        )
        .with_state(report_service)
}
