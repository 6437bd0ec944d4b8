//! Per-request session lifecycle around the workflows.
//!
//! The [`Engine`] owns everything a request needs: the session provider,
//! the site credentials, the cookie store, and the timing knobs. Each call
//! opens a fresh isolated session, runs the workflow, and tears the session
//! down on every path before the result leaves.

use async_trait::async_trait;
use courtbot_browser::chrome::{ChromeLauncher, LaunchOptions};
use courtbot_browser::{PageDriver, PageSession, SessionProvider};
use courtbot_core::AppConfig;
use tracing::error;

use crate::auth::authenticate;
use crate::cookie_store::CookieStore;
use crate::error::BookingError;
use crate::grid::{extract_open_courts, OpenCourtEntry};
use crate::locator::select_day;
use crate::types::{ReservationOutcome, ReservationRequest, SiteCredentials, Timing};
use crate::workflow::run_reservation;

/// The booking operations the HTTP layer and the CLI consume.
#[async_trait]
pub trait CourtService: Send + Sync {
    /// Lists the open slots for `day`, a canonical weekday name inside the
    /// current window.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::DayNotFound`] when the booking page shows no
    /// entry for `day`, and any workflow failure otherwise.
    async fn open_courts(&self, day: &str) -> Result<Vec<OpenCourtEntry>, BookingError>;

    /// Runs one reservation attempt. Infallible by construction: every
    /// failure folds into the outcome.
    async fn reserve(&self, request: &ReservationRequest) -> ReservationOutcome;
}

pub struct Engine<P> {
    provider: P,
    credentials: SiteCredentials,
    store: CookieStore,
    timing: Timing,
}

impl<P> Engine<P> {
    pub fn new(
        provider: P,
        credentials: SiteCredentials,
        store: CookieStore,
        timing: Timing,
    ) -> Self {
        Self {
            provider,
            credentials,
            store,
            timing,
        }
    }
}

impl Engine<ChromeLauncher> {
    /// Production wiring: headless Chrome sessions configured from the app
    /// config.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(
            ChromeLauncher::new(LaunchOptions::from_app_config(config)),
            SiteCredentials::from_app_config(config),
            CookieStore::from_app_config(config),
            Timing::from_app_config(config),
        )
    }
}

impl<P: SessionProvider> Engine<P> {
    async fn open_courts_on<D: PageDriver + ?Sized>(
        &self,
        session: &D,
        day: &str,
    ) -> Result<Vec<OpenCourtEntry>, BookingError> {
        authenticate(session, &self.credentials, &self.store, &self.timing).await?;
        let grid = select_day(session, &self.credentials.booking_url, day, &self.timing)
            .await?
            .ok_or_else(|| BookingError::DayNotFound {
                day: day.to_string(),
            })?;
        Ok(extract_open_courts(&grid))
    }
}

#[async_trait]
impl<P: SessionProvider> CourtService for Engine<P> {
    async fn open_courts(&self, day: &str) -> Result<Vec<OpenCourtEntry>, BookingError> {
        let session = self.provider.open().await?;
        let result = self.open_courts_on(&session, day).await;
        session.close().await;
        result
    }

    async fn reserve(&self, request: &ReservationRequest) -> ReservationOutcome {
        let session = match self.provider.open().await {
            Ok(session) => session,
            Err(err) => {
                error!(error = %err, "failed to open a browser session");
                return ReservationOutcome::Error {
                    detail: format!("browser session: {err}"),
                };
            }
        };
        let outcome = run_reservation(
            &session,
            &self.credentials,
            &self.store,
            request,
            &self.timing,
        )
        .await;
        session.close().await;
        outcome
    }
}
