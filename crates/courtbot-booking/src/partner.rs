//! Partner attachment inside the booking dialog.
//!
//! The add-player control opens an autocomplete; the partner's name is typed
//! with real key events so the suggestion list actually populates, then the
//! entry carrying the requested membership number is clicked. None of this
//! retries: re-clicking a half-open autocomplete double-submits.

use std::time::Duration;

use courtbot_browser::{query, BrowserError, PageDriver};
use tokio::time::Instant;
use tracing::{info, warn};

use crate::error::BookingError;
use crate::selectors;
use crate::types::Timing;

/// Interval between suggestion-list probes.
const SUGGESTION_POLL: Duration = Duration::from_millis(250);

/// Attaches the partner identified by `membership_number` to the open
/// booking dialog.
///
/// A dialog without the add-player control is tolerated: the booking
/// proceeds with nobody attached, and a warning records that.
///
/// # Errors
///
/// Returns [`BookingError::PartnerNotFound`] when no suggestion carries the
/// requested membership number inside the wait window.
pub async fn attach_partner<D: PageDriver + ?Sized>(
    driver: &D,
    partner_name: &str,
    membership_number: &str,
    timing: &Timing,
) -> Result<(), BookingError> {
    match driver
        .wait_for(selectors::ADD_PLAYER_CONTROL, timing.element_wait)
        .await
    {
        Err(BrowserError::WaitTimeout { .. }) => {
            warn!("add-player control not found, booking continues without a partner");
            return Ok(());
        }
        other => other?,
    }

    driver
        .scroll_into_view(selectors::ADD_PLAYER_CONTROL)
        .await?;
    tokio::time::sleep(timing.settle_delay).await;
    driver.click(selectors::ADD_PLAYER_CONTROL).await?;

    driver
        .wait_for(selectors::PARTNER_NAME_INPUT, timing.element_wait)
        .await?;
    driver
        .type_into(selectors::PARTNER_NAME_INPUT, partner_name)
        .await?;

    let memberships = wait_for_suggestions(driver, timing).await?;
    let Some(index) = memberships
        .iter()
        .position(|m| m.as_deref() == Some(membership_number))
    else {
        return Err(BookingError::PartnerNotFound {
            membership_number: membership_number.to_string(),
        });
    };
    driver
        .click_nth(selectors::SUGGESTION_ENTRIES, index)
        .await?;
    info!(partner = partner_name, "partner attached");
    Ok(())
}

/// Polls the suggestion list until it has entries or the window closes,
/// returning the membership attribute of each entry. Always probes at least
/// once; an empty result means the list never populated.
async fn wait_for_suggestions<D: PageDriver + ?Sized>(
    driver: &D,
    timing: &Timing,
) -> Result<Vec<Option<String>>, BookingError> {
    let start = Instant::now();
    loop {
        let entries = query::attribute_values(
            driver,
            selectors::SUGGESTION_ENTRIES,
            selectors::MEMBERSHIP_ATTRIBUTE,
        )
        .await?;
        if !entries.is_empty() {
            return Ok(entries);
        }
        if start.elapsed() >= timing.suggestion_wait {
            return Ok(entries);
        }
        tokio::time::sleep(SUGGESTION_POLL).await;
    }
}
