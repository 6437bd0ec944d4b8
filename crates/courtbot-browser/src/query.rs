//! Page-context DOM probes built on [`PageDriver::eval`].
//!
//! The booking site renders its schedule as plain tables with `onclick`
//! handlers, so most reads collapse to "run a small script, get JSON back".
//! Script builders are split out from the async helpers to keep the
//! generated JavaScript unit-testable without a browser.

use serde_json::Value;

use crate::driver::PageDriver;
use crate::error::BrowserError;

/// Quotes `raw` as a JavaScript string literal using JSON escaping.
#[must_use]
pub fn js_string(raw: &str) -> String {
    Value::String(raw.to_string()).to_string()
}

/// Script evaluating to the trimmed visible text of every element matching
/// `selector`, in document order.
#[must_use]
pub fn texts_script(selector: &str) -> String {
    let sel = js_string(selector);
    format!(
        "Array.from(document.querySelectorAll({sel})).map(el => (el.innerText || '').trim())"
    )
}

/// Script evaluating to the value of `attribute` on every element matching
/// `selector`, with `null` where the attribute is absent.
#[must_use]
pub fn attributes_script(selector: &str, attribute: &str) -> String {
    let sel = js_string(selector);
    let attr = js_string(attribute);
    format!(
        "Array.from(document.querySelectorAll({sel})).map(el => el.getAttribute({attr}))"
    )
}

/// Script firing the DOM `click()` handler of the `index`-th match of
/// `selector`. Evaluates to `true` when the element existed.
#[must_use]
pub fn click_nth_script(selector: &str, index: usize) -> String {
    let sel = js_string(selector);
    format!(
        "(() => {{ const els = document.querySelectorAll({sel}); \
         if (els.length <= {index}) {{ return false; }} \
         els[{index}].click(); return true; }})()"
    )
}

/// Visible texts of all elements matching `selector`.
///
/// # Errors
///
/// Returns [`BrowserError::Eval`] when the script fails or the result is not
/// an array of strings.
pub async fn element_texts<D: PageDriver + ?Sized>(
    driver: &D,
    selector: &str,
) -> Result<Vec<String>, BrowserError> {
    let value = driver.eval(&texts_script(selector)).await?;
    decode(selector, value)
}

/// Values of `attribute` on all elements matching `selector`.
///
/// # Errors
///
/// Returns [`BrowserError::Eval`] when the script fails or the result is not
/// an array.
pub async fn attribute_values<D: PageDriver + ?Sized>(
    driver: &D,
    selector: &str,
    attribute: &str,
) -> Result<Vec<Option<String>>, BrowserError> {
    let value = driver.eval(&attributes_script(selector, attribute)).await?;
    decode(selector, value)
}

fn decode<T: serde::de::DeserializeOwned>(selector: &str, value: Value) -> Result<T, BrowserError> {
    serde_json::from_value(value).map_err(|e| BrowserError::Eval {
        reason: format!("unexpected result shape for \"{selector}\": {e}"),
    })
}
