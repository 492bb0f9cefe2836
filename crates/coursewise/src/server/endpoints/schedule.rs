use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::schedule::{report, ConflictPair, Course};
use crate::server::types::{ApiErrorType, ErrorDetail};
use crate::types::AppState;

/// Body of a clash check request.
#[derive(Debug, Deserialize)]
pub struct ConflictCheckRequest {
    pub courses: Vec<Course>,
}

/// Clash check result: structured pairs plus ready-to-show messages.
#[derive(Debug, Serialize)]
pub struct ConflictCheckResponse {
    pub conflicts: Vec<ConflictPair>,
    pub summary: Vec<String>,
}

/// POST /conflicts
/// Checks the selected courses for timetable clashes
pub async fn post_conflicts(
    State(s): State<Arc<AppState>>,
    body: Result<Json<ConflictCheckRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected clash check body: {}", rejection.body_text());
            return ApiErrorType::from((
                rejection.status(),
                "Malformed request body",
                Some(rejection.body_text()),
            ))
            .into_response();
        }
    };

    info!("POST /conflicts ({} courses)", request.courses.len());

    match s.detector.find_conflicts(&request.courses) {
        Ok(conflicts) => {
            let summary = report::summarize(&conflicts);
            (
                StatusCode::OK,
                Json(ConflictCheckResponse { conflicts, summary }),
            )
                .into_response()
        }
        Err(errors) => {
            warn!("Rejected clash check: {}", errors);
            let details = errors.errors().iter().map(ErrorDetail::from).collect();
            ApiErrorType::from((
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid course selection",
                Some(format!("{} validation error(s)", errors.len())),
            ))
            .with_details(details)
            .into_response()
        }
    }
}
