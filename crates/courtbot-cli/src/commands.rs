//! Command handlers for the CLI.
//!
//! Each handler builds the headless-browser engine from the app config, runs
//! one workflow, and prints the result as JSON on stdout. Failures surface
//! through the normal error path so the process exits nonzero.

use courtbot_booking::{CourtService, Engine, ReservationOutcome, ReservationRequest};
use courtbot_core::{schedule, AppConfig};

/// Resolve a user-supplied weekday against the current four-day window.
fn resolve_day(raw: &str) -> anyhow::Result<&'static str> {
    let window = schedule::current_window();
    schedule::canonical_day(raw)
        .filter(|day| window.contains(day))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "day must be one of the next four days: {}",
                window.join(", ")
            )
        })
}

/// List open courts for `day` and print them as JSON.
///
/// # Errors
///
/// Returns an error if the day is outside the booking window or the browser
/// workflow fails.
pub(crate) async fn run_open_courts(config: &AppConfig, day: &str) -> anyhow::Result<()> {
    let day = resolve_day(day)?;
    let engine = Engine::from_app_config(config);

    tracing::info!(day, "listing open courts");
    let entries = engine.open_courts(day).await?;
    let report = serde_json::json!({ "day": day, "openCourts": entries });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Run the reservation workflow once and print the outcome as JSON.
///
/// # Errors
///
/// Returns an error on invalid arguments, a club booking restriction, an
/// unavailable slot, or a workflow failure.
pub(crate) async fn run_reserve(
    config: &AppConfig,
    day: &str,
    court: u32,
    time: &str,
    partner_name: String,
    partner_membership: String,
) -> anyhow::Result<()> {
    let day = resolve_day(day)?;
    if court == 0 {
        anyhow::bail!("court must be 1 or greater");
    }
    if !schedule::is_valid_start_time(time) {
        anyhow::bail!("time must look like \"9:00 AM\"");
    }
    if partner_name.trim().is_empty() || partner_membership.trim().is_empty() {
        anyhow::bail!("partner name and membership number must not be empty");
    }

    let request = ReservationRequest {
        day: day.to_string(),
        court_number: court,
        start_time: time.to_string(),
        partner_name,
        partner_membership_number: partner_membership,
    };

    let engine = Engine::from_app_config(config);
    tracing::info!(day, court, time, "reserving court");
    match engine.reserve(&request).await {
        ReservationOutcome::Success { message } => {
            let report = serde_json::json!({ "success": true, "message": message });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        ReservationOutcome::Restricted => anyhow::bail!("booking restricted by club rules"),
        ReservationOutcome::SlotUnavailable { detail } => anyhow::bail!(detail),
        ReservationOutcome::Error { detail } => anyhow::bail!(detail),
    }
}
