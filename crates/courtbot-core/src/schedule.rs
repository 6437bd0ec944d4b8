//! Calendar rules for the club's booking window.
//!
//! The club only exposes today plus the next three days in its date picker,
//! so a day is addressed by its full English weekday name ("Monday") and is
//! only bookable while it sits inside that rolling four-day window. The
//! window is recomputed from the local clock on every request.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use regex::Regex;

/// Full English weekday names, Monday-first.
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Full English name for a weekday ("Monday", not chrono's "Mon").
#[must_use]
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Map a raw day string to its canonical weekday name, ignoring case and
/// surrounding whitespace. Returns `None` for anything that is not a full
/// English weekday name.
#[must_use]
pub fn canonical_day(raw: &str) -> Option<&'static str> {
    let trimmed = raw.trim();
    DAY_NAMES
        .iter()
        .find(|name| name.eq_ignore_ascii_case(trimmed))
        .copied()
}

/// The bookable window for a given date: that day plus the next three,
/// as canonical weekday names in calendar order.
#[must_use]
pub fn rolling_window(today: NaiveDate) -> [&'static str; 4] {
    // NaiveDate + 3 days cannot overflow for any date this service will see.
    let day = |offset: u64| {
        let date = today
            .checked_add_days(Days::new(offset))
            .unwrap_or(NaiveDate::MAX);
        weekday_name(date.weekday())
    };
    [day(0), day(1), day(2), day(3)]
}

/// The bookable window as of the local clock, recomputed per call.
#[must_use]
pub fn current_window() -> [&'static str; 4] {
    rolling_window(Local::now().date_naive())
}

/// Whether `raw` names a day inside the window anchored at `today`.
#[must_use]
pub fn is_bookable_day(raw: &str, today: NaiveDate) -> bool {
    match canonical_day(raw) {
        Some(day) => rolling_window(today).contains(&day),
        None => false,
    }
}

/// Whether `raw` is a clock-label start time as the booking grid renders
/// them: `H:MM AM` or `H:MM PM`, twelve-hour, no leading zero on the hour.
#[must_use]
pub fn is_valid_start_time(raw: &str) -> bool {
    let re = Regex::new(r"^(1[0-2]|[1-9]):[0-5][0-9] (AM|PM)$").expect("valid start-time regex");
    re.is_match(raw)
}
