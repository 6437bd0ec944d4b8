//! Scripted page-driver fakes for workflow tests.
//!
//! [`FakeDriver`] records every interaction and answers `eval` calls from a
//! table of (script fragment, value) pairs, so a whole booking run can be
//! staged in-process. [`FakeProvider`] hands out sessions over a shared
//! driver and records teardown.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use courtbot_browser::{BrowserError, CookieRecord, PageDriver, PageSession, SessionProvider};
use serde_json::Value;

use crate::types::Timing;

/// Zero-wait timing so scripted tests never sleep.
pub fn fast_timing() -> Timing {
    Timing {
        element_wait: Duration::ZERO,
        settle_delay: Duration::ZERO,
        suggestion_wait: Duration::ZERO,
        step_attempts: 3,
    }
}

/// One recorded driver interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Goto(String),
    WaitForNavigation,
    WaitFor(String),
    ClickNth(String, usize),
    TypeInto(String, String),
    ScrollIntoView(String),
    Eval(String),
    Cookies,
    SetCookies(usize),
}

#[derive(Default)]
pub struct FakeDriver {
    calls: Mutex<Vec<Call>>,
    eval_responses: Mutex<Vec<(String, Value)>>,
    missing: Mutex<HashSet<String>>,
    goto_failures: AtomicU32,
    page_cookies: Mutex<Vec<CookieRecord>>,
    injected_cookies: Mutex<Vec<CookieRecord>>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers any eval whose script contains `fragment` with `value`.
    /// Responding again for the same fragment replaces the earlier value.
    pub fn respond(&self, fragment: &str, value: Value) {
        let mut responses = self.eval_responses.lock().unwrap();
        if let Some(entry) = responses.iter_mut().find(|(f, _)| f == fragment) {
            entry.1 = value;
        } else {
            responses.push((fragment.to_string(), value));
        }
    }

    /// Marks `selector` as never rendering: waits time out, lookups miss.
    pub fn mark_missing(&self, selector: &str) {
        self.missing.lock().unwrap().insert(selector.to_string());
    }

    /// Fails the next `count` navigations.
    pub fn fail_next_gotos(&self, count: u32) {
        self.goto_failures.store(count, Ordering::SeqCst);
    }

    /// Sets what `cookies()` reports, as if the page had logged in.
    pub fn set_page_cookies(&self, cookies: Vec<CookieRecord>) {
        *self.page_cookies.lock().unwrap() = cookies;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Cookies the code under test pushed in via `set_cookies`.
    pub fn injected_cookies(&self) -> Vec<CookieRecord> {
        self.injected_cookies.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn is_missing(&self, selector: &str) -> bool {
        self.missing.lock().unwrap().contains(selector)
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.record(Call::Goto(url.to_string()));
        let remaining = self.goto_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.goto_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(BrowserError::Navigation {
                url: url.to_string(),
                reason: "scripted failure".to_string(),
            });
        }
        Ok(())
    }

    async fn wait_for_navigation(&self) -> Result<(), BrowserError> {
        self.record(Call::WaitForNavigation);
        Ok(())
    }

    async fn wait_for(&self, selector: &str, wait: Duration) -> Result<(), BrowserError> {
        self.record(Call::WaitFor(selector.to_string()));
        if self.is_missing(selector) {
            return Err(BrowserError::WaitTimeout {
                selector: selector.to_string(),
                waited_ms: u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
            });
        }
        Ok(())
    }

    async fn click_nth(&self, selector: &str, index: usize) -> Result<(), BrowserError> {
        self.record(Call::ClickNth(selector.to_string(), index));
        if self.is_missing(selector) {
            return Err(BrowserError::ElementMissing {
                selector: selector.to_string(),
            });
        }
        Ok(())
    }

    async fn type_into(&self, selector: &str, text: &str) -> Result<(), BrowserError> {
        self.record(Call::TypeInto(selector.to_string(), text.to_string()));
        if self.is_missing(selector) {
            return Err(BrowserError::ElementMissing {
                selector: selector.to_string(),
            });
        }
        Ok(())
    }

    async fn scroll_into_view(&self, selector: &str) -> Result<(), BrowserError> {
        self.record(Call::ScrollIntoView(selector.to_string()));
        if self.is_missing(selector) {
            return Err(BrowserError::ElementMissing {
                selector: selector.to_string(),
            });
        }
        Ok(())
    }

    async fn eval(&self, script: &str) -> Result<Value, BrowserError> {
        self.record(Call::Eval(script.to_string()));
        let responses = self.eval_responses.lock().unwrap();
        for (fragment, value) in responses.iter() {
            if script.contains(fragment.as_str()) {
                return Ok(value.clone());
            }
        }
        Ok(Value::Null)
    }

    async fn cookies(&self) -> Result<Vec<CookieRecord>, BrowserError> {
        self.record(Call::Cookies);
        Ok(self.page_cookies.lock().unwrap().clone())
    }

    async fn set_cookies(&self, cookies: Vec<CookieRecord>) -> Result<(), BrowserError> {
        self.record(Call::SetCookies(cookies.len()));
        *self.injected_cookies.lock().unwrap() = cookies;
        Ok(())
    }
}

/// Session handle over a shared [`FakeDriver`] that records teardown.
pub struct FakeSession {
    driver: Arc<FakeDriver>,
    closed: Arc<AtomicBool>,
}

#[async_trait]
impl PageDriver for FakeSession {
    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.driver.goto(url).await
    }

    async fn wait_for_navigation(&self) -> Result<(), BrowserError> {
        self.driver.wait_for_navigation().await
    }

    async fn wait_for(&self, selector: &str, wait: Duration) -> Result<(), BrowserError> {
        self.driver.wait_for(selector, wait).await
    }

    async fn click_nth(&self, selector: &str, index: usize) -> Result<(), BrowserError> {
        self.driver.click_nth(selector, index).await
    }

    async fn type_into(&self, selector: &str, text: &str) -> Result<(), BrowserError> {
        self.driver.type_into(selector, text).await
    }

    async fn scroll_into_view(&self, selector: &str) -> Result<(), BrowserError> {
        self.driver.scroll_into_view(selector).await
    }

    async fn eval(&self, script: &str) -> Result<Value, BrowserError> {
        self.driver.eval(script).await
    }

    async fn cookies(&self) -> Result<Vec<CookieRecord>, BrowserError> {
        self.driver.cookies().await
    }

    async fn set_cookies(&self, cookies: Vec<CookieRecord>) -> Result<(), BrowserError> {
        self.driver.set_cookies(cookies).await
    }
}

#[async_trait]
impl PageSession for FakeSession {
    async fn close(self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

pub struct FakeProvider {
    driver: Arc<FakeDriver>,
    closed: Arc<AtomicBool>,
    fail_open: AtomicBool,
}

impl FakeProvider {
    pub fn new(driver: Arc<FakeDriver>) -> Self {
        Self {
            driver,
            closed: Arc::new(AtomicBool::new(false)),
            fail_open: AtomicBool::new(false),
        }
    }

    pub fn fail_open(&self) {
        self.fail_open.store(true, Ordering::SeqCst);
    }

    /// Flag set by session teardown; clone it out before handing the
    /// provider to an owner.
    pub fn closed_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }
}

#[async_trait]
impl SessionProvider for FakeProvider {
    type Session = FakeSession;

    async fn open(&self) -> Result<FakeSession, BrowserError> {
        if self.fail_open.load(Ordering::SeqCst) {
            return Err(BrowserError::Launch {
                reason: "scripted launch failure".to_string(),
            });
        }
        Ok(FakeSession {
            driver: Arc::clone(&self.driver),
            closed: Arc::clone(&self.closed),
        })
    }
}

/// A cookie record with plausible values for session fixtures.
pub fn make_cookie(name: &str, value: &str) -> CookieRecord {
    CookieRecord {
        name: name.to_string(),
        value: value.to_string(),
        domain: "club.example.com".to_string(),
        path: "/".to_string(),
        expires: 1_767_225_600.0,
        secure: true,
        http_only: true,
    }
}
