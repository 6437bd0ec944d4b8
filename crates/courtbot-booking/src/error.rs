use courtbot_browser::BrowserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("browser automation error: {0}")]
    Browser(#[from] BrowserError),

    #[error("slot grid snapshot has an unexpected shape: {reason}")]
    GridShape { reason: String },

    #[error("day {day} not present on the booking page")]
    DayNotFound { day: String },

    #[error("no player suggestion matched membership number {membership_number}")]
    PartnerNotFound { membership_number: String },

    #[error("save control not found in the booking dialog")]
    SaveControlMissing,

    #[error("cookie store error for {username}: {reason}")]
    CookieStore { username: String, reason: String },
}
