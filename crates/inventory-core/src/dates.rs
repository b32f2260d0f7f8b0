use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

// ── DateParser ────────────────────────────────────────────────────────────────

/// Parses intake dates from the variety of spellings found in exported
/// spreadsheets.
pub struct DateParser;

impl DateParser {
    /// Date-only patterns, tried in order.
    const DATE_FORMATS: &'static [&'static str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

    /// Date-time patterns; the time component is discarded.
    const DATETIME_FORMATS: &'static [&'static str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
    ];

    /// Parse `s` into a calendar date, or `None` when no pattern matches.
    ///
    /// Handles:
    /// * ISO dates (`2023-01-15`, `2023/01/15`)
    /// * day-first dates (`15/01/2023`, `15-01-2023`)
    /// * date-times with or without fractional seconds
    /// * RFC 3339 timestamps (`2023-01-15T08:30:00Z`), keeping the local date
    pub fn parse(s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.date_naive());
        }

        for fmt in Self::DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
                return Some(date);
            }
        }

        for fmt in Self::DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(naive.date());
            }
        }

        debug!("DateParser: could not parse date string \"{}\"", s);
        None
    }
}
