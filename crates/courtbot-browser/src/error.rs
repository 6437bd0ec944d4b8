use thiserror::Error;

/// Failures crossing the page-automation boundary.
///
/// Reasons are carried as plain strings so no CDP types leak out of the
/// Chrome backend; callers branch on the variant, not the message.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("failed to launch browser: {reason}")]
    Launch { reason: String },

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("navigation did not settle: {reason}")]
    NavigationWait { reason: String },

    #[error("timed out after {waited_ms}ms waiting for \"{selector}\"")]
    WaitTimeout { selector: String, waited_ms: u64 },

    #[error("no element matches \"{selector}\"")]
    ElementMissing { selector: String },

    #[error("script evaluation failed: {reason}")]
    Eval { reason: String },

    #[error("cookie transfer failed: {reason}")]
    Cookies { reason: String },

    #[error("browser session error: {reason}")]
    Session { reason: String },
}
