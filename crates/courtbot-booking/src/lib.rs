//! The booking workflow against the club's reservation site.
//!
//! Everything here drives a [`courtbot_browser::PageDriver`] and owns no
//! browser details of its own. The [`Engine`] is the entry point: it opens
//! one isolated session per request, authenticates (stored cookies first,
//! login form as fallback), and either lists open courts or runs the full
//! reservation workflow.

pub mod auth;
pub mod confirm;
pub mod cookie_store;
pub mod engine;
pub mod error;
pub mod grid;
pub mod locator;
pub mod partner;
pub mod retry;
pub mod selectors;
pub mod types;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testutil;

pub use cookie_store::CookieStore;
pub use engine::{CourtService, Engine};
pub use error::BookingError;
pub use grid::{
    extract_open_courts, find_slot, OpenCourtEntry, SlotCell, SlotGrid, SlotRef, SlotRow,
};
pub use types::{ReservationOutcome, ReservationRequest, SiteCredentials, Timing};
pub use workflow::CONFIRMATION_MESSAGE;
