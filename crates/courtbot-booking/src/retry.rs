//! Bounded retry for the browser-facing steps that are safe to repeat.
//!
//! Only the login flow and the day-selection sequence run under this helper.
//! Partner attachment and confirmation are never retried; their clicks are
//! not idempotent and a second pass could double-submit.

use std::fmt::Display;
use std::future::Future;

use tracing::warn;

/// Runs `op` up to `attempts` times, returning the first success or the last
/// error. No backoff between attempts; every failure is warn-logged with the
/// attempt number.
///
/// An `attempts` of zero is treated as one.
///
/// # Errors
///
/// Returns the error from the final attempt once the bound is exhausted.
pub async fn with_attempts<T, E, F, Fut>(step: &str, attempts: u32, mut op: F) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < attempts => {
                warn!(step, attempt, error = %error, "attempt failed, retrying");
                attempt += 1;
            }
            Err(error) => {
                warn!(step, attempt, error = %error, "attempt failed, giving up");
                return Err(error);
            }
        }
    }
}
