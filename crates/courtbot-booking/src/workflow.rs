//! The reservation workflow state machine.
//!
//! Stages run strictly in order: authenticate, select the day, locate the
//! slot, open its dialog, attach the partner, confirm. Expected negatives
//! (day or slot not available) exit early as [`ReservationOutcome`] values;
//! stage failures fold into [`ReservationOutcome::Error`] with the stage
//! name in the detail. Nothing here raises past the outcome type.

use std::fmt;

use courtbot_browser::PageDriver;
use tracing::{debug, error, info};

use crate::auth::authenticate;
use crate::confirm::{confirm, ConfirmOutcome};
use crate::cookie_store::CookieStore;
use crate::error::BookingError;
use crate::grid::find_slot;
use crate::locator::select_day;
use crate::partner::attach_partner;
use crate::selectors;
use crate::types::{ReservationOutcome, ReservationRequest, SiteCredentials, Timing};

/// Fixed confirmation text returned on success.
pub const CONFIRMATION_MESSAGE: &str = "Court booked successfully";

/// Workflow stages in execution order. A failed stage names itself in the
/// outcome detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Authenticate,
    SelectDay,
    LocateSlot,
    OpenDialog,
    AttachPartner,
    Confirm,
}

impl Stage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Authenticate => "authenticate",
            Stage::SelectDay => "select-day",
            Stage::LocateSlot => "locate-slot",
            Stage::OpenDialog => "open-dialog",
            Stage::AttachPartner => "attach-partner",
            Stage::Confirm => "confirm",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs one reservation attempt end to end on the given page.
///
/// Every exit is a [`ReservationOutcome`]; failures never escape as `Err`,
/// so the caller always has exactly one definitive result to report.
pub async fn run_reservation<D: PageDriver + ?Sized>(
    driver: &D,
    credentials: &SiteCredentials,
    store: &CookieStore,
    request: &ReservationRequest,
    timing: &Timing,
) -> ReservationOutcome {
    info!(
        day = %request.day,
        court = request.court_number,
        time = %request.start_time,
        "reservation started"
    );
    match run_stages(driver, credentials, store, request, timing).await {
        Ok(outcome) => {
            info!(?outcome, "reservation finished");
            outcome
        }
        Err((stage, err)) => {
            error!(stage = %stage, error = %err, "reservation failed");
            ReservationOutcome::Error {
                detail: format!("{stage} failed: {err}"),
            }
        }
    }
}

async fn run_stages<D: PageDriver + ?Sized>(
    driver: &D,
    credentials: &SiteCredentials,
    store: &CookieStore,
    request: &ReservationRequest,
    timing: &Timing,
) -> Result<ReservationOutcome, (Stage, BookingError)> {
    authenticate(driver, credentials, store, timing)
        .await
        .map_err(|e| (Stage::Authenticate, e))?;

    let Some(grid) = select_day(driver, &credentials.booking_url, &request.day, timing)
        .await
        .map_err(|e| (Stage::SelectDay, e))?
    else {
        return Ok(ReservationOutcome::SlotUnavailable {
            detail: "date not found".to_string(),
        });
    };

    let Some(slot) = find_slot(&grid, request.court_number, &request.start_time) else {
        return Ok(ReservationOutcome::SlotUnavailable {
            detail: "slot not found or not available".to_string(),
        });
    };
    driver
        .click(&selectors::slot_cell(slot.row, slot.column))
        .await
        .map_err(|e| (Stage::LocateSlot, BookingError::from(e)))?;

    // The dialog opens client-side with no signal to wait on.
    debug!(stage = %Stage::OpenDialog, "waiting for the booking dialog");
    tokio::time::sleep(timing.settle_delay).await;

    attach_partner(
        driver,
        &request.partner_name,
        &request.partner_membership_number,
        timing,
    )
    .await
    .map_err(|e| (Stage::AttachPartner, e))?;

    match confirm(driver, timing)
        .await
        .map_err(|e| (Stage::Confirm, e))?
    {
        ConfirmOutcome::Restricted => Ok(ReservationOutcome::Restricted),
        ConfirmOutcome::Confirmed => Ok(ReservationOutcome::Success {
            message: CONFIRMATION_MESSAGE.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "workflow_test.rs"]
mod tests;
