use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files. Useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup, no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<bool>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let site_username = require("COURTBOT_SITE_USERNAME")?;
    let site_password = require("COURTBOT_SITE_PASSWORD")?;
    let login_url = require("COURTBOT_LOGIN_URL")?;
    let booking_url = require("COURTBOT_BOOKING_URL")?;

    let env = parse_environment(&or_default("COURTBOT_ENV", "development"));

    let bind_addr = parse_addr("COURTBOT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("COURTBOT_LOG_LEVEL", "info");
    let cookie_dir = PathBuf::from(or_default("COURTBOT_COOKIE_DIR", "."));
    let headless = parse_bool("COURTBOT_HEADLESS", "true")?;
    let chrome_executable = lookup("COURTBOT_CHROME_PATH").ok().map(PathBuf::from);

    let nav_timeout_secs = parse_u64("COURTBOT_NAV_TIMEOUT_SECS", "30")?;
    let element_wait_ms = parse_u64("COURTBOT_ELEMENT_WAIT_MS", "10000")?;
    let settle_delay_ms = parse_u64("COURTBOT_SETTLE_DELAY_MS", "2000")?;
    let suggestion_wait_ms = parse_u64("COURTBOT_SUGGESTION_WAIT_MS", "5000")?;
    let step_attempts = parse_u32("COURTBOT_STEP_ATTEMPTS", "3")?;

    Ok(AppConfig {
        site_username,
        site_password,
        login_url,
        booking_url,
        env,
        bind_addr,
        log_level,
        cookie_dir,
        headless,
        chrome_executable,
        nav_timeout_secs,
        element_wait_ms,
        settle_delay_ms,
        suggestion_wait_ms,
        step_attempts,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
