//! Authentication against the club site.
//!
//! A stored session short-circuits the whole flow: its cookies go straight
//! into the page and nothing is validated until a later step fails. The
//! fresh-login path drives the form and persists whatever cookies the site
//! handed back. This is the only module that touches the cookie store.

use courtbot_browser::{BrowserError, PageDriver};
use tracing::info;

use crate::cookie_store::CookieStore;
use crate::error::BookingError;
use crate::retry::with_attempts;
use crate::selectors;
use crate::types::{SiteCredentials, Timing};

/// How the session ended up authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Cookies from a previous login were restored; no navigation happened.
    RestoredSession,
    /// The login form was driven and the new cookies were persisted.
    FreshLogin,
}

/// Establishes an authenticated page for `credentials.username`.
///
/// The login unit (navigate, fill, submit, settle) runs under the bounded
/// retry policy; exhausting it is fatal for the request.
///
/// # Errors
///
/// Returns the final login failure once retries are exhausted, or a
/// [`BookingError::CookieStore`] when persisting the fresh session fails.
pub async fn authenticate<D: PageDriver + ?Sized>(
    driver: &D,
    credentials: &SiteCredentials,
    store: &CookieStore,
    timing: &Timing,
) -> Result<AuthMethod, BookingError> {
    if let Some(cookies) = store.load(&credentials.username) {
        driver.set_cookies(cookies).await?;
        info!(username = %credentials.username, "restored stored session");
        return Ok(AuthMethod::RestoredSession);
    }

    with_attempts("login", timing.step_attempts, || {
        login_once(driver, credentials, timing)
    })
    .await?;

    let cookies = driver.cookies().await?;
    store.save(&credentials.username, &cookies)?;
    info!(
        username = %credentials.username,
        cookie_count = cookies.len(),
        "logged in and stored session"
    );
    Ok(AuthMethod::FreshLogin)
}

async fn login_once<D: PageDriver + ?Sized>(
    driver: &D,
    credentials: &SiteCredentials,
    timing: &Timing,
) -> Result<(), BrowserError> {
    driver.goto(&credentials.login_url).await?;
    driver
        .wait_for(selectors::LOGIN_USERNAME_INPUT, timing.element_wait)
        .await?;
    driver
        .type_into(selectors::LOGIN_USERNAME_INPUT, &credentials.username)
        .await?;
    driver
        .type_into(selectors::LOGIN_PASSWORD_INPUT, &credentials.password)
        .await?;
    driver.click(selectors::LOGIN_SUBMIT_BUTTON).await?;
    driver.wait_for_navigation().await?;
    Ok(())
}
