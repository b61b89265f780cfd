//! Posted-date normalization.
//!
//! The site shows relative dates ("3 days ago") and keeps the exact value in
//! the element's `title` attribute, e.g. `May 1st, 2021 10:00 AM`. The value
//! has no timezone and is kept as a naive timestamp.

use chrono::NaiveDateTime;

use crate::patterns::{DAY_ORDINAL, WHITESPACE_RUN};
use crate::{Error, Result};

/// Site format once ordinal suffixes are removed. `%B` also accepts
/// abbreviated month names when parsing.
const SITE_FORMAT: &str = "%B %d, %Y %I:%M %p";

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse an exact-value date string into a timestamp.
pub fn normalize_date(raw: &str) -> Result<NaiveDateTime> {
    let collapsed = WHITESPACE_RUN.replace_all(raw.trim(), " ");
    let cleaned = DAY_ORDINAL.replace_all(&collapsed, "$1");

    NaiveDateTime::parse_from_str(&cleaned, SITE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(&cleaned, ISO_FORMAT))
        .map_err(|e| Error::unparsable("posted date", format!("'{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .expect("valid date")
    }

    #[test]
    fn test_site_format() {
        assert_eq!(normalize_date("May 1st, 2021 10:00 AM").ok(), Some(at(2021, 5, 1, 10, 0)));
        assert_eq!(normalize_date("Jan 22nd, 2019 07:05 PM").ok(), Some(at(2019, 1, 22, 19, 5)));
        assert_eq!(normalize_date("September 3rd, 2020 12:30 AM").ok(), Some(at(2020, 9, 3, 0, 30)));
    }

    #[test]
    fn test_extra_whitespace() {
        assert_eq!(normalize_date("  Dec 4th,  2018\n 11:59 PM ").ok(), Some(at(2018, 12, 4, 23, 59)));
    }

    #[test]
    fn test_iso_value() {
        assert_eq!(normalize_date("2021-05-01T10:00:00").ok(), Some(at(2021, 5, 1, 10, 0)));
    }

    #[test]
    fn test_relative_text_is_malformed() {
        match normalize_date("3 days ago") {
            Err(Error::MalformedDocument { role, detail }) => {
                assert_eq!(role, "posted date");
                assert!(detail.is_some_and(|d| d.contains("3 days ago")));
            }
            other => panic!("expected MalformedDocument, got {other:?}"),
        }
    }
}
