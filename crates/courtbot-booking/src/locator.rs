//! Day selection on the booking page.
//!
//! The page renders a strip of day tabs; the target is matched by visible
//! weekday text and its DOM click handler is fired directly, because the
//! real tab swallows synthetic pointer events. The whole navigate → pick →
//! settle → grid-ready sequence retries as one unit.

use courtbot_browser::{query, PageDriver};
use tracing::debug;

use crate::error::BookingError;
use crate::grid::SlotGrid;
use crate::retry::with_attempts;
use crate::selectors;
use crate::types::Timing;

/// Serializes the visible slot table into the [`SlotGrid`] JSON shape in one
/// page-context pass.
const GRID_SNAPSHOT_SCRIPT: &str = r"(() => {
  const table = document.querySelector('table.booking-grid');
  if (!table) { return null; }
  const courts = Array.from(table.querySelectorAll('thead th'))
    .slice(1)
    .map(th => (th.innerText || '').trim());
  const rows = Array.from(table.querySelectorAll('tbody tr')).map(tr => {
    const cells = Array.from(tr.querySelectorAll('td'));
    return {
      timeLabel: cells.length > 0 ? (cells[0].innerText || '').trim() : '',
      cells: cells.slice(1).map(td => ({
        open: td.classList.contains('open'),
        startTime: td.getAttribute('data-start-time'),
      })),
    };
  });
  return { courts, rows };
})()";

/// Navigates to the booking page and selects `day` from the date picker.
///
/// Returns `Ok(None)` when no picker entry shows the requested weekday name;
/// that is an expected negative, not a failure, and is never retried.
///
/// # Errors
///
/// Returns the final failure once the sequence has exhausted its retry
/// bound, or [`BookingError::GridShape`] when the slot table does not
/// serialize into the expected form.
pub async fn select_day<D: PageDriver + ?Sized>(
    driver: &D,
    booking_url: &str,
    day: &str,
    timing: &Timing,
) -> Result<Option<SlotGrid>, BookingError> {
    with_attempts("select-day", timing.step_attempts, || {
        select_day_once(driver, booking_url, day, timing)
    })
    .await
}

async fn select_day_once<D: PageDriver + ?Sized>(
    driver: &D,
    booking_url: &str,
    day: &str,
    timing: &Timing,
) -> Result<Option<SlotGrid>, BookingError> {
    driver.goto(booking_url).await?;
    driver
        .wait_for(selectors::DATE_PICKER, timing.element_wait)
        .await?;

    let labels = query::element_texts(driver, selectors::DAY_OPTIONS).await?;
    // First tab in document order whose text shows the weekday name wins.
    let Some(index) = labels.iter().position(|text| text.contains(day)) else {
        debug!(day, "no date-picker entry for day");
        return Ok(None);
    };
    driver.click_nth(selectors::DAY_OPTIONS, index).await?;

    // The grid swap has no completion event, only the settle delay.
    tokio::time::sleep(timing.settle_delay).await;
    driver
        .wait_for(selectors::SLOT_GRID_TABLE, timing.element_wait)
        .await?;

    let grid = snapshot_grid(driver).await?;
    debug!(day, rows = grid.rows.len(), courts = grid.courts.len(), "day selected");
    Ok(Some(grid))
}

async fn snapshot_grid<D: PageDriver + ?Sized>(driver: &D) -> Result<SlotGrid, BookingError> {
    let value = driver.eval(GRID_SNAPSHOT_SCRIPT).await?;
    serde_json::from_value(value).map_err(|e| BookingError::GridShape {
        reason: e.to_string(),
    })
}
