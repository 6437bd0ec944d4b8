//! Saving the booking and reading the site's verdict.
//!
//! The save control is found by its visible "Save" label among the dialog
//! buttons. After the click there is nothing to wait on, so a settle delay
//! passes before the page's headings are swept for the restriction banner.

use std::time::Duration;

use courtbot_browser::{query, PageDriver};
use tokio::time::Instant;
use tracing::info;

use crate::error::BookingError;
use crate::selectors;
use crate::types::Timing;

/// Interval between save-button probes.
const BUTTON_POLL: Duration = Duration::from_millis(250);

/// What the site decided about the booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed,
    /// A club rule blocked the booking; the slot itself was open.
    Restricted,
}

/// Clicks the dialog's save control and inspects the page for a restriction
/// banner. Never retried: a second save could double-book.
///
/// # Errors
///
/// Returns [`BookingError::SaveControlMissing`] when no dialog button shows
/// the "Save" label inside the wait window.
pub async fn confirm<D: PageDriver + ?Sized>(
    driver: &D,
    timing: &Timing,
) -> Result<ConfirmOutcome, BookingError> {
    let Some(index) = wait_for_save_button(driver, timing).await? else {
        return Err(BookingError::SaveControlMissing);
    };
    driver.click_nth(selectors::DIALOG_BUTTONS, index).await?;
    tokio::time::sleep(timing.settle_delay).await;

    let headings = query::element_texts(driver, selectors::PAGE_HEADINGS).await?;
    if headings.iter().any(|text| text.contains("Restriction")) {
        info!("restriction banner detected");
        return Ok(ConfirmOutcome::Restricted);
    }
    Ok(ConfirmOutcome::Confirmed)
}

/// Polls the dialog buttons for one labelled exactly "Save", returning its
/// index. Always probes at least once.
async fn wait_for_save_button<D: PageDriver + ?Sized>(
    driver: &D,
    timing: &Timing,
) -> Result<Option<usize>, BookingError> {
    let start = Instant::now();
    loop {
        let labels = query::element_texts(driver, selectors::DIALOG_BUTTONS).await?;
        if let Some(index) = labels.iter().position(|label| label == "Save") {
            return Ok(Some(index));
        }
        if start.elapsed() >= timing.element_wait {
            return Ok(None);
        }
        tokio::time::sleep(BUTTON_POLL).await;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::testutil::{fast_timing, Call, FakeDriver};

    use super::*;

    #[tokio::test]
    async fn clicks_save_and_reports_confirmed() {
        let driver = FakeDriver::new();
        driver.respond("booking-dialog button", json!(["Cancel", "Save"]));
        driver.respond("h1, h2", json!(["Reservation Details", "Booking Confirmed"]));

        let outcome = confirm(&driver, &fast_timing()).await.unwrap();

        assert_eq!(outcome, ConfirmOutcome::Confirmed);
        assert!(driver
            .calls()
            .contains(&Call::ClickNth(selectors::DIALOG_BUTTONS.to_string(), 1)));
    }

    #[tokio::test]
    async fn a_restriction_heading_reports_restricted() {
        let driver = FakeDriver::new();
        driver.respond("booking-dialog button", json!(["Save"]));
        driver.respond("h1, h2", json!(["Restriction: daily limit reached"]));

        let outcome = confirm(&driver, &fast_timing()).await.unwrap();

        assert_eq!(outcome, ConfirmOutcome::Restricted);
    }

    #[tokio::test]
    async fn a_missing_save_button_is_an_error() {
        let driver = FakeDriver::new();
        driver.respond("booking-dialog button", json!(["Cancel", "Close"]));

        let err = confirm(&driver, &fast_timing()).await.unwrap_err();

        assert!(matches!(err, BookingError::SaveControlMissing));
    }

    #[tokio::test]
    async fn the_save_label_must_match_exactly() {
        let driver = FakeDriver::new();
        driver.respond("booking-dialog button", json!(["Save and close"]));

        let err = confirm(&driver, &fast_timing()).await.unwrap_err();

        assert!(matches!(err, BookingError::SaveControlMissing));
    }
}
