//! Date display helpers.

use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

const DISPLAY: &[BorrowedFormatItem<'_>] = format_description!("[month repr:short] [day padding:none], [year]");
const DATE_ONLY: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const LOCAL_MINUTES: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]T[hour]:[minute]");
const LOCAL_SECONDS: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Render a date or timestamp as e.g. `Mar 7, 2025`.
///
/// Accepts RFC 3339 timestamps, `<input type="datetime-local">` values and
/// plain `YYYY-MM-DD` dates. Timestamps carrying an offset are shown on the
/// calendar day they fall on at `local`. Returns `None` for anything else.
#[must_use]
pub fn format_date(input: &str, local: UtcOffset) -> Option<String> {
    let date = local_date(input, local)?;
    match date.format(DISPLAY) {
        Ok(text) => Some(text),
        Err(err) => {
            log::warn!("could not format {date}: {err}");
            None
        }
    }
}

/// Calendar date of `input` as seen from `local`.
#[must_use]
pub fn local_date(input: &str, local: UtcOffset) -> Option<Date> {
    match OffsetDateTime::parse(input.trim(), &Rfc3339) {
        Ok(ts) => Some(ts.to_offset(local).date()),
        Err(_) => parse_date(input),
    }
}

/// Parse the calendar date out of a date or timestamp string.
#[must_use]
pub fn parse_date(input: &str) -> Option<Date> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(ts) = OffsetDateTime::parse(input, &Rfc3339) {
        return Some(ts.date());
    }
    if let Ok(ts) = PrimitiveDateTime::parse(input, LOCAL_SECONDS) {
        return Some(ts.date());
    }
    if let Ok(ts) = PrimitiveDateTime::parse(input, LOCAL_MINUTES) {
        return Some(ts.date());
    }
    match Date::parse(input, DATE_ONLY) {
        Ok(date) => Some(date),
        Err(_) => None,
    }
}

/// `YYYY-MM-DD`, the form date inputs expect for `min`/`max`/`value`.
#[must_use]
pub fn iso_date(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;
