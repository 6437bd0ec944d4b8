//! Browser capability layer: the page-automation interface the booking
//! workflow drives, plus the headless-Chrome implementation behind it.
//!
//! Workflow code only ever sees [`PageDriver`] and friends; everything
//! Chrome-specific (CDP plumbing, process lifecycle, cookie conversion)
//! stays inside [`chrome`].

pub mod chrome;
pub mod driver;
pub mod error;
pub mod query;

pub use chrome::{ChromeLauncher, ChromeSession, LaunchOptions};
pub use driver::{CookieRecord, PageDriver, PageSession, SessionProvider};
pub use error::BrowserError;
