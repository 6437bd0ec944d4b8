//! Cookie persistence keyed by username.
//!
//! One JSON file per username under the configured directory. A login
//! overwrites the whole file; concurrent requests for the same username race
//! with last-writer-wins semantics and no locking. That gap is accepted: the
//! worst case is one extra login on a later request.

use std::fs;
use std::io;
use std::path::PathBuf;

use courtbot_browser::CookieRecord;
use courtbot_core::AppConfig;
use tracing::warn;

use crate::error::BookingError;

#[derive(Debug, Clone)]
pub struct CookieStore {
    dir: PathBuf,
}

impl CookieStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(config.cookie_dir.clone())
    }

    fn file_path(&self, username: &str) -> PathBuf {
        self.dir.join(format!("{username}.json"))
    }

    /// Loads the stored session for `username`, if a usable one exists.
    ///
    /// A missing file means no stored session. An unreadable or corrupt file
    /// is treated the same way, with a warning; the caller falls back to a
    /// fresh login and the next save replaces the bad file.
    #[must_use]
    pub fn load(&self, username: &str) -> Option<Vec<CookieRecord>> {
        let path = self.file_path(username);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return None,
            Err(error) => {
                warn!(path = %path.display(), error = %error, "cookie file unreadable, ignoring");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(cookies) => Some(cookies),
            Err(error) => {
                warn!(path = %path.display(), error = %error, "cookie file corrupt, ignoring");
                None
            }
        }
    }

    /// Persists `cookies` for `username`, overwriting any previous file.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::CookieStore`] when serialization or the write
    /// fails.
    pub fn save(&self, username: &str, cookies: &[CookieRecord]) -> Result<(), BookingError> {
        let path = self.file_path(username);
        let raw = serde_json::to_string_pretty(cookies).map_err(|e| BookingError::CookieStore {
            username: username.to_string(),
            reason: e.to_string(),
        })?;
        fs::write(&path, raw).map_err(|e| BookingError::CookieStore {
            username: username.to_string(),
            reason: format!("write {}: {e}", path.display()),
        })
    }
}
