//! Day-first timestamp parsing for the `Dates` column.

use chrono::{NaiveDate, NaiveDateTime};

/// Date-time layouts tried in order.  Day-first layouts come before the ISO
/// ones so that `02/01/2019` is the 2nd of January.
const DATETIME_FMTS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts; the result is midnight of that day.
const DATE_FMTS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d"];

/// Parse a `Dates` cell, interpreting ambiguous numeric dates day-first.
///
/// Returns `None` for empty strings or unrecognised layouts.
pub fn parse_day_first(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    DATE_FMTS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Clock label for an hour of the day, e.g. `18` → `"18:00"`.
pub fn hour_label(hour: u32) -> String {
    format!("{:02}:00", hour)
}
