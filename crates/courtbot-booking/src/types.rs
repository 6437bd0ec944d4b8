//! Request, outcome, and configuration-view types for the booking workflow.

use std::fmt;
use std::time::Duration;

use courtbot_core::AppConfig;
use serde::{Deserialize, Serialize};

/// Site login material plus the two entry-point URLs, carried as an explicit
/// value so no component reads configuration implicitly.
#[derive(Clone)]
pub struct SiteCredentials {
    pub username: String,
    pub password: String,
    pub login_url: String,
    pub booking_url: String,
}

impl SiteCredentials {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            username: config.site_username.clone(),
            password: config.site_password.clone(),
            login_url: config.login_url.clone(),
            booking_url: config.booking_url.clone(),
        }
    }
}

impl fmt::Debug for SiteCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteCredentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("login_url", &self.login_url)
            .field("booking_url", &self.booking_url)
            .finish()
    }
}

/// Waits and pacing for the browser-facing steps.
///
/// `element_wait` bounds waits keyed to an observable condition (an element
/// appearing). `settle_delay` is the fixed pause used where the site gives no
/// signal to wait on, such as a client-side dialog opening.
#[derive(Debug, Clone)]
pub struct Timing {
    pub element_wait: Duration,
    pub settle_delay: Duration,
    /// Window for the partner autocomplete list to populate.
    pub suggestion_wait: Duration,
    /// Attempt bound for the retryable units (login, day selection).
    pub step_attempts: u32,
}

impl Timing {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            element_wait: Duration::from_millis(config.element_wait_ms),
            settle_delay: Duration::from_millis(config.settle_delay_ms),
            suggestion_wait: Duration::from_millis(config.suggestion_wait_ms),
            step_attempts: config.step_attempts,
        }
    }
}

/// A booking request as received on the wire.
///
/// Field validation (day inside the rolling window, `H:MM AM|PM` start time,
/// positive court, non-empty partner fields) happens at the HTTP boundary
/// before any browser work starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub day: String,
    pub court_number: u32,
    pub start_time: String,
    pub partner_name: String,
    pub partner_membership_number: String,
}

/// Definitive result of one reservation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationOutcome {
    /// The booking went through; `message` is the fixed confirmation text.
    Success { message: String },
    /// The club's booking rules blocked an otherwise bookable slot.
    Restricted,
    /// The requested day or slot was not available. Expected negative, not a
    /// system fault.
    SlotUnavailable { detail: String },
    /// The workflow failed; `detail` names the stage and the underlying error.
    Error { detail: String },
}
