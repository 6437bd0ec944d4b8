use serde_json::json;
use tempfile::TempDir;

use crate::cookie_store::CookieStore;
use crate::selectors;
use crate::testutil::{fast_timing, make_cookie, Call, FakeDriver};
use crate::types::{ReservationOutcome, ReservationRequest, SiteCredentials};

use super::{run_reservation, CONFIRMATION_MESSAGE};

fn make_credentials() -> SiteCredentials {
    SiteCredentials {
        username: "member42".to_string(),
        password: "hunter2".to_string(),
        login_url: "https://club.example.com/login".to_string(),
        booking_url: "https://club.example.com/booking".to_string(),
    }
}

fn make_request() -> ReservationRequest {
    ReservationRequest {
        day: "Tuesday".to_string(),
        court_number: 2,
        start_time: "9:00 AM".to_string(),
        partner_name: "Alex Chen".to_string(),
        partner_membership_number: "4821".to_string(),
    }
}

/// Store pre-seeded with a session so runs take the restore path.
fn seeded_store(dir: &TempDir) -> CookieStore {
    let store = CookieStore::new(dir.path());
    store
        .save("member42", &[make_cookie("session", "stored")])
        .unwrap();
    store
}

fn grid_json(target_open: bool) -> serde_json::Value {
    json!({
        "courts": ["Court 1", "Court 2"],
        "rows": [
            {
                "timeLabel": "9:00 AM",
                "cells": [
                    { "open": false, "startTime": null },
                    { "open": target_open, "startTime": "9:00 AM" }
                ]
            },
            {
                "timeLabel": "10:00 AM",
                "cells": [
                    { "open": true, "startTime": "10:00 AM" },
                    { "open": false, "startTime": null }
                ]
            }
        ]
    })
}

/// Driver scripted for a clean end-to-end run.
fn scripted_driver() -> FakeDriver {
    let driver = FakeDriver::new();
    driver.respond(
        "day-option",
        json!(["Tuesday", "Wednesday", "Thursday", "Friday"]),
    );
    driver.respond("booking-grid", grid_json(true));
    driver.respond("player-suggestions", json!(["4821"]));
    driver.respond("booking-dialog button", json!(["Cancel", "Save"]));
    driver.respond("h1, h2", json!(["Booking Confirmed"]));
    driver
}

#[tokio::test]
async fn an_open_slot_books_through_to_success() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);
    let driver = scripted_driver();

    let outcome = run_reservation(
        &driver,
        &make_credentials(),
        &store,
        &make_request(),
        &fast_timing(),
    )
    .await;

    assert_eq!(
        outcome,
        ReservationOutcome::Success {
            message: CONFIRMATION_MESSAGE.to_string()
        }
    );

    let calls = driver.calls();
    // Restored session, then straight to the booking page.
    assert!(calls.contains(&Call::SetCookies(1)));
    assert!(calls.contains(&Call::Goto("https://club.example.com/booking".to_string())));
    assert!(calls.contains(&Call::ClickNth(selectors::DAY_OPTIONS.to_string(), 0)));
    // Court 2 at 9:00 AM sits at grid row 0, column 1.
    assert!(calls.contains(&Call::ClickNth(selectors::slot_cell(0, 1), 0)));
    assert!(calls.contains(&Call::TypeInto(
        selectors::PARTNER_NAME_INPUT.to_string(),
        "Alex Chen".to_string()
    )));
    assert!(calls.contains(&Call::ClickNth(
        selectors::SUGGESTION_ENTRIES.to_string(),
        0
    )));
    assert!(calls.contains(&Call::ClickNth(selectors::DIALOG_BUTTONS.to_string(), 1)));
}

#[tokio::test]
async fn a_closed_slot_exits_before_any_partner_interaction() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);
    let driver = FakeDriver::new();
    driver.respond("day-option", json!(["Tuesday"]));
    driver.respond("booking-grid", grid_json(false));

    let outcome = run_reservation(
        &driver,
        &make_credentials(),
        &store,
        &make_request(),
        &fast_timing(),
    )
    .await;

    assert_eq!(
        outcome,
        ReservationOutcome::SlotUnavailable {
            detail: "slot not found or not available".to_string()
        }
    );
    // The workflow never reached the dialog.
    assert!(!driver
        .calls()
        .iter()
        .any(|call| matches!(call, Call::TypeInto(_, _))));
}

#[tokio::test]
async fn a_day_missing_from_the_picker_is_date_not_found() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);
    let driver = FakeDriver::new();
    driver.respond("day-option", json!(["Wednesday", "Thursday"]));

    let outcome = run_reservation(
        &driver,
        &make_credentials(),
        &store,
        &make_request(),
        &fast_timing(),
    )
    .await;

    assert_eq!(
        outcome,
        ReservationOutcome::SlotUnavailable {
            detail: "date not found".to_string()
        }
    );
}

#[tokio::test]
async fn a_restriction_heading_maps_to_restricted() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);
    let driver = scripted_driver();
    driver.respond("h1, h2", json!(["Restriction: daily limit reached"]));

    let outcome = run_reservation(
        &driver,
        &make_credentials(),
        &store,
        &make_request(),
        &fast_timing(),
    )
    .await;

    assert_eq!(outcome, ReservationOutcome::Restricted);
}

#[tokio::test]
async fn a_missing_save_control_maps_to_error() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);
    let driver = FakeDriver::new();
    driver.respond("day-option", json!(["Tuesday"]));
    driver.respond("booking-grid", grid_json(true));
    driver.respond("player-suggestions", json!(["4821"]));
    driver.respond("booking-dialog button", json!(["Cancel", "Close"]));

    let outcome = run_reservation(
        &driver,
        &make_credentials(),
        &store,
        &make_request(),
        &fast_timing(),
    )
    .await;

    match outcome {
        ReservationOutcome::Error { detail } => {
            assert!(detail.contains("confirm failed"));
            assert!(detail.contains("save control"));
        }
        other => panic!("expected Error, got {other:?}"),
    }
}

#[tokio::test]
async fn an_unmatched_membership_number_maps_to_error() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);
    let driver = FakeDriver::new();
    driver.respond("day-option", json!(["Tuesday"]));
    driver.respond("booking-grid", grid_json(true));
    driver.respond("player-suggestions", json!(["9999"]));

    let outcome = run_reservation(
        &driver,
        &make_credentials(),
        &store,
        &make_request(),
        &fast_timing(),
    )
    .await;

    match outcome {
        ReservationOutcome::Error { detail } => {
            assert!(detail.contains("attach-partner failed"));
            assert!(detail.contains("4821"));
        }
        other => panic!("expected Error, got {other:?}"),
    }
}

#[tokio::test]
async fn login_exhaustion_maps_to_error() {
    let dir = TempDir::new().unwrap();
    // Empty store forces the fresh-login path.
    let store = CookieStore::new(dir.path());
    let driver = FakeDriver::new();
    driver.fail_next_gotos(3);

    let outcome = run_reservation(
        &driver,
        &make_credentials(),
        &store,
        &make_request(),
        &fast_timing(),
    )
    .await;

    match outcome {
        ReservationOutcome::Error { detail } => {
            assert!(detail.contains("authenticate failed"));
        }
        other => panic!("expected Error, got {other:?}"),
    }
}

// Preserves the observed tolerance: no add-player control, yet the booking
// still saves, silently partnerless.
#[tokio::test]
async fn a_missing_add_player_control_still_books() {
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);
    let driver = scripted_driver();
    driver.mark_missing(selectors::ADD_PLAYER_CONTROL);

    let outcome = run_reservation(
        &driver,
        &make_credentials(),
        &store,
        &make_request(),
        &fast_timing(),
    )
    .await;

    assert_eq!(
        outcome,
        ReservationOutcome::Success {
            message: CONFIRMATION_MESSAGE.to_string()
        }
    );
    assert!(!driver
        .calls()
        .iter()
        .any(|call| matches!(call, Call::TypeInto(_, _))));
}
