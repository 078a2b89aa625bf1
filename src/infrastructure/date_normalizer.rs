//! Loose date parsing for the two date styles found on the listing page.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::domain::constants::sentinel;

/// Which listing field a raw date string came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateMode {
    /// The `<time>` element on each item; already a plain calendar date.
    Received,
    /// The `CLOSES:` tail of the summary, which buries the date after free
    /// text like "Submissions close 4pm".
    Closing,
}

/// Day-of-month with optional ordinal suffix, month word and 4-digit year,
/// anywhere in the string. A time like "4pm" does not match because the
/// digits must be followed by an ordinal suffix or whitespace.
static CLOSING_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+([A-Za-z]+)\s+(\d{4})\b")
        .expect("closing date pattern is valid")
});

/// Formats tried in order. Month and weekday names are matched
/// case-insensitively and in abbreviated form as well.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%d/%m/%Y",
    "%A, %d %B %Y",
    "%A %d %B %Y",
];

/// Coerces a loosely formatted date string into `YYYY-MM-DD`.
///
/// Never fails past this boundary: anything unparsable comes back as the
/// `"Invalid"` sentinel.
pub fn normalize_date(raw: &str, mode: DateMode) -> String {
    let candidate = match mode {
        DateMode::Received => raw.trim().to_string(),
        DateMode::Closing => rearrange_closing(raw.trim()),
    };

    match parse_loose(&candidate) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => {
            debug!("Unparsable {:?} date: {:?}", mode, raw);
            sentinel::INVALID_DATE.to_string()
        }
    }
}

/// Pulls the day/month/year triple out of the closing text and reassembles
/// it as `day month year`. Strings without the triple pass through unchanged
/// and fail at the parse step instead.
fn rearrange_closing(raw: &str) -> String {
    match CLOSING_DATE.captures(raw) {
        Some(caps) => format!("{} {} {}", &caps[1], &caps[2], &caps[3]),
        None => raw.to_string(),
    }
}

fn parse_loose(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}
