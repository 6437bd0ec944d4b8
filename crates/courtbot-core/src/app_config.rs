use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide configuration, loaded once at startup from environment
/// variables. Downstream crates derive their own narrow views from this
/// (`SiteCredentials`, `LaunchOptions`, `Timing`) instead of reading the
/// environment themselves.
#[derive(Clone)]
pub struct AppConfig {
    /// Club-site member login name.
    pub site_username: String,
    /// Club-site member password.
    pub site_password: String,
    /// Absolute URL of the club's login page.
    pub login_url: String,
    /// Absolute URL of the club's court-booking page.
    pub booking_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Directory holding one `<username>.json` cookie file per account.
    pub cookie_dir: PathBuf,
    /// Run Chrome headless. Disable locally to watch the booking happen.
    pub headless: bool,
    /// Explicit Chrome/Chromium binary; `None` lets the launcher auto-detect.
    pub chrome_executable: Option<PathBuf>,
    /// Upper bound on a single page navigation.
    pub nav_timeout_secs: u64,
    /// Upper bound on waiting for an element to appear.
    pub element_wait_ms: u64,
    /// Fixed pause after actions with no observable completion signal
    /// (day click, slot click, save click).
    pub settle_delay_ms: u64,
    /// How long the partner autocomplete gets to populate suggestions.
    pub suggestion_wait_ms: u64,
    /// Attempts for the retried workflow units (login, day selection).
    pub step_attempts: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("site_username", &self.site_username)
            .field("site_password", &"[redacted]")
            .field("login_url", &self.login_url)
            .field("booking_url", &self.booking_url)
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("cookie_dir", &self.cookie_dir)
            .field("headless", &self.headless)
            .field("chrome_executable", &self.chrome_executable)
            .field("nav_timeout_secs", &self.nav_timeout_secs)
            .field("element_wait_ms", &self.element_wait_ms)
            .field("settle_delay_ms", &self.settle_delay_ms)
            .field("suggestion_wait_ms", &self.suggestion_wait_ms)
            .field("step_attempts", &self.step_attempts)
            .finish()
    }
}
