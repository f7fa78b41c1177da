// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::fmt;

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};

use crate::model::Timestamp;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const THOUSAND: i64 = 1_000;
const MILLION: i64 = 1_000_000;
const BILLION: i64 = 1_000_000_000;

/// Word count used for post excerpts in list rows.
pub const DEFAULT_EXCERPT_WORDS: usize = 10;

const ELLIPSIS: &str = " ...";

/// Formats a document timestamp as a short date, e.g. `"Nov 14, 2023"`.
///
/// The calendar date is taken in the device's local time zone. Month names
/// are always English, whatever the device locale.
///
/// Returns an empty string when there is no timestamp, or when the instant
/// is outside the range `chrono` can represent.
///
/// # Examples
///
/// ```
/// assert_eq!(woco::util::format::format_date(None), "");
/// ```
pub fn format_date(timestamp: Option<&Timestamp>) -> String {
    format_date_in(timestamp, &Local)
}

/// Same as [`format_date`] but with an explicit time zone.
pub fn format_date_in<Tz: TimeZone>(timestamp: Option<&Timestamp>, tz: &Tz) -> String {
    let Some(timestamp) = timestamp else {
        return String::new();
    };

    let Some(instant) = DateTime::<Utc>::from_timestamp_millis(timestamp.to_epoch_millis()) else {
        return String::new();
    };

    let date = instant.with_timezone(tz);
    format!(
        "{} {}, {}",
        MONTHS[date.month0() as usize],
        date.day(),
        date.year()
    )
}

/// Result of [`format_number`].
///
/// Small counts are shown as-is, so callers get the original number back
/// rather than a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountLabel {
    Raw(i64),
    Abbreviated(String),
}

impl fmt::Display for CountLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountLabel::Raw(n) => write!(f, "{n}"),
            CountLabel::Abbreviated(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CountLabel {
    fn from(n: i64) -> Self {
        format_number(n)
    }
}

/// Abbreviates a like or comment count.
///
/// Counts of a thousand or more are scaled to `K`, `M` or `B` with one
/// decimal place, rounded half-up, and a trailing `.0` dropped. Anything
/// smaller, including zero and negative values, is returned unchanged.
///
/// # Examples
///
/// ```
/// use woco::util::format::{CountLabel, format_number};
///
/// assert_eq!(format_number(999), CountLabel::Raw(999));
/// assert_eq!(format_number(1500).to_string(), "1.5K");
/// ```
pub fn format_number(n: i64) -> CountLabel {
    let (unit, suffix) = if n >= BILLION {
        (BILLION, 'B')
    } else if n >= MILLION {
        (MILLION, 'M')
    } else if n >= THOUSAND {
        (THOUSAND, 'K')
    } else {
        return CountLabel::Raw(n);
    };

    // Tenths of a unit, rounded half-up. Widened so `i64::MAX * 10` fits.
    let unit = i128::from(unit);
    let tenths = (i128::from(n) * 10 + unit / 2) / unit;
    let (whole, fraction) = (tenths / 10, tenths % 10);

    let label = if fraction == 0 {
        format!("{whole}{suffix}")
    } else {
        format!("{whole}.{fraction}{suffix}")
    };

    CountLabel::Abbreviated(label)
}

/// Shortens `text` to at most `max_words` words, appending `" ..."` when
/// anything was cut.
///
/// Words are separated by single spaces; consecutive spaces produce empty
/// words, which still count towards the limit.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    if text.is_empty() {
        return String::new();
    }

    let words: Vec<&str> = text.split(' ').collect();
    if words.len() <= max_words {
        return text.to_string();
    }

    let mut truncated = words[..max_words].join(" ");
    truncated.push_str(ELLIPSIS);
    truncated
}
