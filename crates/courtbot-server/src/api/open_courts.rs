use axum::{
    extract::{Query, State},
    Extension, Json,
};
use courtbot_booking::OpenCourtEntry;
use courtbot_core::schedule;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct OpenCourtsQuery {
    day: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct OpenCourtsResponse {
    day: &'static str,
    open_courts: Vec<OpenCourtEntry>,
}

/// GET /api/v1/open-courts?day=Tuesday
pub(super) async fn open_courts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<OpenCourtsQuery>,
) -> Result<Json<OpenCourtsResponse>, ApiError> {
    let day = validate_day(query.day.as_deref())?;
    tracing::info!(request_id = %req_id.0, day, "listing open courts");

    let open_courts = state.service.open_courts(day).await.map_err(|err| {
        tracing::error!(
            request_id = %req_id.0,
            day,
            error = %err,
            "open-court listing failed"
        );
        ApiError::internal(err.to_string())
    })?;

    Ok(Json(OpenCourtsResponse { day, open_courts }))
}

/// Resolves `day` to the canonical weekday name, rejecting anything outside
/// the current four-day booking window.
fn validate_day(raw: Option<&str>) -> Result<&'static str, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|day| !day.is_empty())
        .ok_or_else(|| ApiError::bad_request("missing required query parameter: day"))?;

    let window = schedule::current_window();
    schedule::canonical_day(raw)
        .filter(|day| window.contains(day))
        .ok_or_else(|| {
            ApiError::bad_request(format!(
                "day must be one of the next four days: {}",
                window.join(", ")
            ))
        })
}
