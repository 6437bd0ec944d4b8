//! Headless-Chrome backend for the page-automation traits.
//!
//! Every [`SessionProvider::open`] call launches a dedicated Chrome process
//! with a throwaway profile directory, so concurrent requests can never see
//! each other's page state, cookies, or cache. Teardown kills the process
//! and removes the profile.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{Cookie, CookieParam, TimeSinceEpoch};
use chromiumoxide::Page;
use courtbot_core::AppConfig;
use futures::StreamExt;
use serde_json::Value;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::driver::{CookieRecord, PageDriver, PageSession, SessionProvider};
use crate::error::BrowserError;
use crate::query;

/// Interval between element-existence probes in [`PageDriver::wait_for`].
const ELEMENT_POLL: Duration = Duration::from_millis(100);

/// Chrome launch settings, derived from the application config.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub headless: bool,
    /// Explicit Chrome/Chromium binary; `None` lets chromiumoxide detect one.
    pub chrome_executable: Option<PathBuf>,
    /// Upper bound on page navigations and post-submit settling.
    pub nav_timeout: Duration,
}

impl LaunchOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            headless: config.headless,
            chrome_executable: config.chrome_executable.clone(),
            nav_timeout: Duration::from_secs(config.nav_timeout_secs),
        }
    }
}

/// Launches one isolated [`ChromeSession`] per request.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    options: LaunchOptions,
}

impl ChromeLauncher {
    #[must_use]
    pub fn new(options: LaunchOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl SessionProvider for ChromeLauncher {
    type Session = ChromeSession;

    async fn open(&self) -> Result<ChromeSession, BrowserError> {
        let profile_dir = TempDir::new().map_err(|e| BrowserError::Launch {
            reason: format!("temp profile dir: {e}"),
        })?;

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .window_size(1280, 900)
            .user_data_dir(profile_dir.path());
        if !self.options.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.options.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|reason| BrowserError::Launch { reason })?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch {
                reason: e.to_string(),
            })?;

        // Drains CDP websocket traffic for the lifetime of the session.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let mut browser = browser;
                if let Err(close_err) = browser.close().await {
                    tracing::warn!(error = %close_err, "browser close after failed page open");
                }
                handler_task.abort();
                return Err(BrowserError::Launch {
                    reason: format!("initial page: {e}"),
                });
            }
        };

        tracing::debug!(headless = self.options.headless, "chrome session opened");

        Ok(ChromeSession {
            browser,
            page,
            handler_task,
            nav_timeout: self.options.nav_timeout,
            _profile_dir: profile_dir,
        })
    }
}

/// One live Chrome process plus the single page the workflow drives.
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    nav_timeout: Duration,
    /// Keeps the throwaway profile alive until teardown.
    _profile_dir: TempDir,
}

#[async_trait]
impl PageDriver for ChromeSession {
    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        match timeout(self.nav_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(BrowserError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(BrowserError::Navigation {
                url: url.to_string(),
                reason: format!("timed out after {}s", self.nav_timeout.as_secs()),
            }),
        }
    }

    async fn wait_for_navigation(&self) -> Result<(), BrowserError> {
        match timeout(self.nav_timeout, self.page.wait_for_navigation()).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(BrowserError::NavigationWait {
                reason: e.to_string(),
            }),
            Err(_) => Err(BrowserError::NavigationWait {
                reason: format!("timed out after {}s", self.nav_timeout.as_secs()),
            }),
        }
    }

    async fn wait_for(&self, selector: &str, wait: Duration) -> Result<(), BrowserError> {
        let start = Instant::now();
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if start.elapsed() >= wait {
                return Err(BrowserError::WaitTimeout {
                    selector: selector.to_string(),
                    waited_ms: u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                });
            }
            tokio::time::sleep(ELEMENT_POLL).await;
        }
    }

    async fn click_nth(&self, selector: &str, index: usize) -> Result<(), BrowserError> {
        let clicked = self.eval(&query::click_nth_script(selector, index)).await?;
        if clicked.as_bool() == Some(true) {
            Ok(())
        } else {
            let selector = if index == 0 {
                selector.to_string()
            } else {
                format!("{selector} (match {index})")
            };
            Err(BrowserError::ElementMissing { selector })
        }
    }

    async fn type_into(&self, selector: &str, text: &str) -> Result<(), BrowserError> {
        let element =
            self.page
                .find_element(selector)
                .await
                .map_err(|_| BrowserError::ElementMissing {
                    selector: selector.to_string(),
                })?;
        // Click to focus, then type with real key events.
        element.click().await.map_err(|e| BrowserError::Session {
            reason: format!("focus {selector}: {e}"),
        })?;
        element
            .type_str(text)
            .await
            .map_err(|e| BrowserError::Session {
                reason: format!("type into {selector}: {e}"),
            })?;
        Ok(())
    }

    async fn scroll_into_view(&self, selector: &str) -> Result<(), BrowserError> {
        let element =
            self.page
                .find_element(selector)
                .await
                .map_err(|_| BrowserError::ElementMissing {
                    selector: selector.to_string(),
                })?;
        element
            .scroll_into_view()
            .await
            .map_err(|e| BrowserError::Session {
                reason: format!("scroll {selector}: {e}"),
            })?;
        Ok(())
    }

    async fn eval(&self, script: &str) -> Result<Value, BrowserError> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::Eval {
                reason: e.to_string(),
            })?;
        Ok(result.value().cloned().unwrap_or(Value::Null))
    }

    async fn cookies(&self) -> Result<Vec<CookieRecord>, BrowserError> {
        let cookies = self
            .page
            .get_cookies()
            .await
            .map_err(|e| BrowserError::Cookies {
                reason: e.to_string(),
            })?;
        Ok(cookies.into_iter().map(record_from_cookie).collect())
    }

    async fn set_cookies(&self, cookies: Vec<CookieRecord>) -> Result<(), BrowserError> {
        let params = cookies
            .into_iter()
            .map(cookie_param)
            .collect::<Result<Vec<_>, _>>()?;
        self.page
            .set_cookies(params)
            .await
            .map_err(|e| BrowserError::Cookies {
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

#[async_trait]
impl PageSession for ChromeSession {
    async fn close(self) {
        let ChromeSession {
            browser,
            page,
            handler_task,
            nav_timeout: _,
            _profile_dir,
        } = self;
        let mut browser = browser;

        if let Err(error) = page.close().await {
            tracing::warn!(error = %error, "page close returned error");
        }
        if let Err(error) = browser.close().await {
            tracing::warn!(error = %error, "browser close returned error");
        }
        handler_task.abort();
        drop(_profile_dir);
        tracing::debug!("chrome session closed");
    }
}

fn record_from_cookie(cookie: Cookie) -> CookieRecord {
    CookieRecord {
        name: cookie.name,
        value: cookie.value,
        domain: cookie.domain,
        path: cookie.path,
        expires: cookie.expires,
        secure: cookie.secure,
        http_only: cookie.http_only,
    }
}

fn cookie_param(record: CookieRecord) -> Result<CookieParam, BrowserError> {
    CookieParam::builder()
        .name(record.name)
        .value(record.value)
        .domain(record.domain)
        .path(record.path)
        .expires(TimeSinceEpoch::new(record.expires))
        .secure(record.secure)
        .http_only(record.http_only)
        .build()
        .map_err(|reason| BrowserError::Cookies { reason })
}
