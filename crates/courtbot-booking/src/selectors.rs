//! CSS selectors for the club booking site.
//!
//! The site has no API and no stable test ids, so everything is addressed by
//! the markup it happens to render. All knowledge of that markup lives here;
//! when the club redesigns a page, this is the file to update.

/// Username field on the login page.
pub const LOGIN_USERNAME_INPUT: &str = "input[name='username']";
/// Password field on the login page.
pub const LOGIN_PASSWORD_INPUT: &str = "input[name='password']";
/// Submit button on the login form.
pub const LOGIN_SUBMIT_BUTTON: &str = "form.login-form button[type='submit']";

/// Date-picker strip on the booking page. Used as the readiness signal after
/// navigation.
pub const DATE_PICKER: &str = "#date-picker";
/// Clickable day tabs inside the picker, in document order.
pub const DAY_OPTIONS: &str = "#date-picker a.day-option";

/// The slot grid table for the selected day.
pub const SLOT_GRID_TABLE: &str = "table.booking-grid";

/// The add-player icon control inside the booking dialog.
pub const ADD_PLAYER_CONTROL: &str = ".booking-dialog i.icon-add-player";
/// Autocomplete input for the partner's name.
pub const PARTNER_NAME_INPUT: &str = ".booking-dialog input.player-search";
/// Autocomplete suggestion entries.
pub const SUGGESTION_ENTRIES: &str = ".booking-dialog ul.player-suggestions li";
/// Attribute on a suggestion entry carrying the member's number.
pub const MEMBERSHIP_ATTRIBUTE: &str = "data-membership";

/// All buttons in the booking dialog; the save control is found by its
/// visible "Save" label, not by a selector of its own.
pub const DIALOG_BUTTONS: &str = ".booking-dialog button";

/// Top-level headings swept for the restriction banner after saving.
pub const PAGE_HEADINGS: &str = "h1, h2";

/// Selector for one slot cell, addressed by zero-based grid coordinates.
///
/// `nth-child` is 1-based and the first `td` of every row is the time label,
/// so the cell for court column `column` sits at `td:nth-child(column + 2)`.
#[must_use]
pub fn slot_cell(row: usize, column: usize) -> String {
    format!(
        "{SLOT_GRID_TABLE} tbody tr:nth-child({}) td:nth-child({})",
        row + 1,
        column + 2
    )
}
