use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BrowserError;

/// One browser cookie in storage-friendly form.
///
/// This is the persistence shape for restored sessions, deliberately
/// decoupled from any CDP type so cookie files survive backend upgrades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    /// Seconds since the UNIX epoch; `-1.0` marks a session cookie.
    pub expires: f64,
    pub secure: bool,
    pub http_only: bool,
}

/// The page-automation vocabulary the booking workflow is written against.
///
/// Implementations drive a real page (see [`crate::chrome::ChromeSession`])
/// or script responses in tests. Click methods trigger the element's DOM
/// `click()` handler rather than synthesizing pointer events, because the
/// club site wires all of its booking controls through onclick handlers.
/// Typing, by contrast, sends real key events so autocomplete widgets fire.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate the page and wait for the load to complete.
    async fn goto(&self, url: &str) -> Result<(), BrowserError>;

    /// Wait for an in-flight navigation (e.g. after a form submit) to settle.
    async fn wait_for_navigation(&self) -> Result<(), BrowserError>;

    /// Wait until some element matches `selector`, polling up to `timeout`.
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError>;

    /// Fire the DOM click handler of the `index`-th element matching
    /// `selector` (document order, zero-based).
    async fn click_nth(&self, selector: &str, index: usize) -> Result<(), BrowserError>;

    /// Focus the first element matching `selector` and type `text` with
    /// real key events.
    async fn type_into(&self, selector: &str, text: &str) -> Result<(), BrowserError>;

    /// Scroll the first element matching `selector` into the viewport.
    async fn scroll_into_view(&self, selector: &str) -> Result<(), BrowserError>;

    /// Evaluate a script in page context and return its JSON value.
    /// Results that do not serialize come back as `Value::Null`.
    async fn eval(&self, script: &str) -> Result<Value, BrowserError>;

    /// Snapshot all cookies visible to the current page.
    async fn cookies(&self) -> Result<Vec<CookieRecord>, BrowserError>;

    /// Install cookies into the browsing session.
    async fn set_cookies(&self, cookies: Vec<CookieRecord>) -> Result<(), BrowserError>;

    /// Fire the DOM click handler of the first element matching `selector`.
    async fn click(&self, selector: &str) -> Result<(), BrowserError> {
        self.click_nth(selector, 0).await
    }
}

/// A [`PageDriver`] with a lifecycle: sessions are opened by a
/// [`SessionProvider`], used for exactly one request, and closed.
#[async_trait]
pub trait PageSession: PageDriver {
    /// Tear down the session and release the underlying browser resources.
    ///
    /// Close failures are logged by the implementation, never surfaced:
    /// teardown must not mask the outcome of the work that preceded it.
    async fn close(self);
}

/// Factory for isolated page sessions, one per incoming request.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    type Session: PageSession;

    /// Open a fresh session with no shared page state.
    async fn open(&self) -> Result<Self::Session, BrowserError>;
}
