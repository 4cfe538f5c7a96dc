//! Compact Finnish date notation parsing.
//!
//! The calendar menu writes dates as `day.month.year` with the month and
//! year freely dropped when the surrounding text makes them obvious:
//! "12.-14.7." spells a July range, "25.7" a single day of the current
//! year. This module turns those fragments back into full calendar dates.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

/// Matches one compact date token: day with its trailing dot, then an
/// optional month and an optional dotted 2–4 digit year.
pub static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-3]?[0-9]\.(?:1?[0-9])?(?:\.[0-9]{2,4})?").expect("date regex")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("non-numeric component {piece:?} in date token {token:?}")]
    BadNumber { token: String, piece: String },
    /// The last token of a range must spell out its own month; there is
    /// nothing after it to inherit one from.
    #[error("date token {token:?} has no month and nothing to inherit one from")]
    MonthUnderspecified { token: String },
    #[error("{year:04}-{month:02}-{day:02} is not a real calendar date")]
    OutOfRange { year: i32, month: u32, day: u32 },
}

// ── Single token ─────────────────────────────────────────────────────

/// The components one token spells out by itself. Missing pieces are
/// filled in later from a neighboring token or the reference year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub day: u32,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// Parse one matched token into its partial components.
///
/// Surrounding dots and whitespace are tolerated ("14.7." and "14.7"
/// are the same token). A 2–3 digit year is expanded into the
/// millennium of `reference_year`: "1.1.10" read in 2024 means 2010.
pub fn parse_fragment(reference_year: i32, token: &str) -> Result<Fragment, DateError> {
    let trimmed = token.trim_matches(|c: char| c == '.' || c.is_whitespace());

    let mut day = 0;
    let mut month = None;
    let mut year = None;
    for (index, piece) in trimmed.split('.').enumerate() {
        let numeric: i32 = piece.parse().map_err(|_| DateError::BadNumber {
            token: token.to_string(),
            piece: piece.to_string(),
        })?;
        match index {
            0 => day = numeric as u32,
            1 => month = Some(numeric as u32),
            _ if numeric < 1000 => year = Some(1000 * (reference_year / 1000) + numeric),
            _ => year = Some(numeric),
        }
    }
    Ok(Fragment { day, month, year })
}

// ── Ranges ───────────────────────────────────────────────────────────

/// Resolve every date token found in `text` into a full calendar date,
/// returned in source order. No tokens means an empty list, not an error.
///
/// Tokens are folded right to left so that a day-only token like "12."
/// in "12.-14.7." borrows its month from the more specific token written
/// after it. A missing year always comes from `reference_year`, never
/// from a neighbor.
pub fn resolve_range(reference_year: i32, text: &str) -> Result<Vec<NaiveDate>, DateError> {
    let tokens: Vec<&str> = DATE_PATTERN.find_iter(text).map(|m| m.as_str()).collect();
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    let fragments = tokens
        .iter()
        .map(|token| parse_fragment(reference_year, token))
        .collect::<Result<Vec<_>, _>>()?;

    // Accumulator carries the resolved month of the previously processed
    // (i.e. next-in-source) token.
    let mut inherited_month: Option<u32> = None;
    let mut resolved = Vec::with_capacity(fragments.len());
    for (index, fragment) in fragments.iter().enumerate().rev() {
        let month = match fragment.month {
            Some(month) => month,
            None => inherited_month.ok_or_else(|| DateError::MonthUnderspecified {
                token: tokens[index].to_string(),
            })?,
        };
        inherited_month = Some(month);
        let year = fragment.year.unwrap_or(reference_year);
        let date = NaiveDate::from_ymd_opt(year, month, fragment.day).ok_or(
            DateError::OutOfRange {
                year,
                month,
                day: fragment.day,
            },
        )?;
        resolved.push(date);
    }
    resolved.reverse();
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(iso: &str) -> NaiveDate {
        iso.parse().unwrap()
    }

    // ── parse_fragment ───────────────────────────────────────────────

    #[test]
    fn test_parse_fragment_day_only() {
        assert_eq!(
            parse_fragment(2024, "12."),
            Ok(Fragment {
                day: 12,
                month: None,
                year: None
            })
        );
    }

    #[test]
    fn test_parse_fragment_day_month() {
        assert_eq!(
            parse_fragment(2024, "14.7"),
            Ok(Fragment {
                day: 14,
                month: Some(7),
                year: None
            })
        );
    }

    #[test]
    fn test_parse_fragment_full() {
        assert_eq!(
            parse_fragment(2024, "1.1.2024"),
            Ok(Fragment {
                day: 1,
                month: Some(1),
                year: Some(2024)
            })
        );
    }

    #[test]
    fn test_parse_fragment_short_year_expands_to_reference_millennium() {
        assert_eq!(parse_fragment(2024, "1.1.10").unwrap().year, Some(2010));
        assert_eq!(parse_fragment(2024, "1.1.99").unwrap().year, Some(2099));
        assert_eq!(parse_fragment(2024, "1.1.999").unwrap().year, Some(2999));
    }

    #[test]
    fn test_parse_fragment_non_numeric() {
        assert_eq!(
            parse_fragment(2024, "ab.7"),
            Err(DateError::BadNumber {
                token: "ab.7".to_string(),
                piece: "ab".to_string()
            })
        );
    }

    // ── resolve_range ────────────────────────────────────────────────

    #[test]
    fn test_resolve_range_table() {
        let cases: &[(&str, &[&str])] = &[
            ("Jake 25.7", &["2024-07-25"]),
            ("25.7.", &["2024-07-25"]),
            ("1.1.10", &["2010-01-01"]),
            ("5.6. 8.6.", &["2024-06-05", "2024-06-08"]),
            ("1.1.2024 - 2.1.2025", &["2024-01-01", "2025-01-02"]),
            ("12.-14.7", &["2024-07-12", "2024-07-14"]),
        ];
        for (text, expected) in cases {
            let expected: Vec<NaiveDate> = expected.iter().map(|d| date(d)).collect();
            assert_eq!(
                resolve_range(2024, text).unwrap(),
                expected,
                "input: {text:?}"
            );
        }
    }

    #[test]
    fn test_resolve_range_no_tokens() {
        assert_eq!(resolve_range(2024, "Yhteystiedot").unwrap(), vec![]);
        assert_eq!(resolve_range(2024, "").unwrap(), vec![]);
    }

    #[test]
    fn test_resolve_range_year_never_inherited_from_neighbor() {
        // The day-only token takes its month from "14.7.25" but its year
        // from the reference year.
        assert_eq!(
            resolve_range(2024, "12.-14.7.25").unwrap(),
            vec![date("2024-07-12"), date("2025-07-14")]
        );
    }

    #[test]
    fn test_resolve_range_last_token_must_carry_month() {
        assert_eq!(
            resolve_range(2024, "Kisat 12."),
            Err(DateError::MonthUnderspecified {
                token: "12.".to_string()
            })
        );
    }

    #[test]
    fn test_resolve_range_rejects_impossible_date() {
        assert_eq!(
            resolve_range(2024, "31.2."),
            Err(DateError::OutOfRange {
                year: 2024,
                month: 2,
                day: 31
            })
        );
    }
}
