use axum::{extract::State, Extension, Json};
use courtbot_booking::{ReservationOutcome, ReservationRequest};
use courtbot_core::schedule;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub(super) struct ReserveResponse {
    success: bool,
    message: String,
}

/// POST /api/v1/reserve-court
///
/// Drives the full booking workflow and reports the outcome. Validation
/// failures never spend a browser session.
pub(super) async fn reserve_court(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(mut request): Json<ReservationRequest>,
) -> Result<Json<ReserveResponse>, ApiError> {
    validate_request(&mut request)?;
    tracing::info!(
        request_id = %req_id.0,
        day = %request.day,
        court = request.court_number,
        time = %request.start_time,
        "reserving court"
    );

    match state.service.reserve(&request).await {
        ReservationOutcome::Success { message } => Ok(Json(ReserveResponse {
            success: true,
            message,
        })),
        ReservationOutcome::Restricted => {
            tracing::warn!(request_id = %req_id.0, "booking restricted by the club");
            Err(ApiError::restricted())
        }
        ReservationOutcome::SlotUnavailable { detail } => {
            tracing::warn!(request_id = %req_id.0, detail = %detail, "slot unavailable");
            Err(ApiError::internal(detail))
        }
        ReservationOutcome::Error { detail } => {
            tracing::error!(request_id = %req_id.0, detail = %detail, "reservation failed");
            Err(ApiError::internal(detail))
        }
    }
}

/// Checks every field up front, canonicalizing `day` in place so the workflow
/// only ever sees weekday names as the booking site spells them.
fn validate_request(request: &mut ReservationRequest) -> Result<(), ApiError> {
    let window = schedule::current_window();
    let day = schedule::canonical_day(&request.day)
        .filter(|day| window.contains(day))
        .ok_or_else(|| {
            ApiError::bad_request(format!(
                "day must be one of the next four days: {}",
                window.join(", ")
            ))
        })?;
    request.day = day.to_string();

    if request.court_number == 0 {
        return Err(ApiError::bad_request("courtNumber must be 1 or greater"));
    }
    if !schedule::is_valid_start_time(&request.start_time) {
        return Err(ApiError::bad_request("startTime must look like \"9:00 AM\""));
    }
    if request.partner_name.trim().is_empty() {
        return Err(ApiError::bad_request("partnerName must not be empty"));
    }
    if request.partner_membership_number.trim().is_empty() {
        return Err(ApiError::bad_request(
            "partnerMembershipNumber must not be empty",
        ));
    }
    Ok(())
}
