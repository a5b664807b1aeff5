//! Calendar dates for suggested-edit tooltips.
//!
//! Revision attributes carry ISO 8601 timestamps such as `2024-06-15` or
//! `2024-06-15T14:30:00Z`. Tooltips show only the calendar date, in the short
//! form of a configured locale.
//!
//! The date is shown as written: no timezone conversion is applied, so a
//! timestamp always renders on the day it names.
//!
//! ```ignore
//! let date = CalendarDate::parse("2024-06-15T14:30:45Z").unwrap();
//! assert_eq!(DateLocale::EnUs.format_short(date), "6/15/2024");
//! ```

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A validated year-month-day triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Parse the date part of an ISO 8601 date or date-time.
    ///
    /// Accepts `YYYY-MM-DD`, optionally followed by `T` or a space and a
    /// `HH:MM[:SS[.fff]]` time with an optional `Z` or `±HH:MM` offset.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let bytes = s.as_bytes();

        if bytes.len() < 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }

        let date = Self::new(
            parse_u16(&bytes[0..4])?,
            parse_u8(&bytes[5..7])?,
            parse_u8(&bytes[8..10])?,
        );
        date.validate().ok()?;

        match bytes.get(10) {
            None => Some(date),
            Some(b'T' | b't' | b' ') if valid_time(&bytes[11..]) => Some(date),
            Some(_) => None,
        }
    }

    pub fn validate(self) -> Result<()> {
        let Self { year, month, day } = self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }
        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }
}

/// Validate `HH:MM[:SS[.fff]][Z|±HH:MM]`.
fn valid_time(bytes: &[u8]) -> bool {
    if bytes.len() < 5 || bytes[2] != b':' {
        return false;
    }
    let (Some(hour), Some(minute)) = (parse_u8(&bytes[0..2]), parse_u8(&bytes[3..5])) else {
        return false;
    };
    if hour > 23 || minute > 59 {
        return false;
    }

    let mut rest = &bytes[5..];
    if rest.first() == Some(&b':') {
        match rest.get(1..3).and_then(parse_u8) {
            Some(second) if second <= 60 => rest = &rest[3..],
            _ => return false,
        }
        if rest.first() == Some(&b'.') {
            let digits = rest[1..].iter().take_while(|b| b.is_ascii_digit()).count();
            if digits == 0 {
                return false;
            }
            rest = &rest[1 + digits..];
        }
    }

    match rest {
        [] | [b'Z' | b'z'] => true,
        [b'+' | b'-', h1, h2, b':', m1, m2] => {
            parse_u8(&[*h1, *h2]).is_some_and(|h| h <= 23)
                && parse_u8(&[*m1, *m2]).is_some_and(|m| m <= 59)
        }
        _ => false,
    }
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

// =============================================================================
// Locale short formats
// =============================================================================

/// Locales with a known short date format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateLocale {
    /// `6/15/2024`
    #[default]
    EnUs,
    /// `15/06/2024`
    EnGb,
    /// `15.6.2024`
    DeDe,
    /// `15/06/2024`
    FrFr,
    /// `2024/6/15`
    JaJp,
    /// `2024-06-15`
    Iso,
}

impl DateLocale {
    pub const ALL: [DateLocale; 6] = [
        Self::EnUs,
        Self::EnGb,
        Self::DeDe,
        Self::FrFr,
        Self::JaJp,
        Self::Iso,
    ];

    /// Canonical tag, as accepted in config and on the command line.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
            Self::DeDe => "de-DE",
            Self::FrFr => "fr-FR",
            Self::JaJp => "ja-JP",
            Self::Iso => "iso",
        }
    }

    pub fn format_short(self, date: CalendarDate) -> String {
        let CalendarDate { year, month, day } = date;
        match self {
            Self::EnUs => format!("{month}/{day}/{year}"),
            Self::EnGb | Self::FrFr => format!("{day:02}/{month:02}/{year}"),
            Self::DeDe => format!("{day}.{month}.{year}"),
            Self::JaJp => format!("{year}/{month}/{day}"),
            Self::Iso => format!("{year:04}-{month:02}-{day:02}"),
        }
    }
}

/// Error for an unrecognised locale tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLocale(pub String);

impl fmt::Display for UnknownLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown locale `{}`", self.0)
    }
}

impl std::error::Error for UnknownLocale {}

impl FromStr for DateLocale {
    type Err = UnknownLocale;

    /// Matches case-insensitively; `_` is accepted in place of `-` and a
    /// bare language picks its primary region.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "-").to_ascii_lowercase();
        let locale = match normalized.as_str() {
            "en" | "en-us" => Self::EnUs,
            "en-gb" => Self::EnGb,
            "de" | "de-de" => Self::DeDe,
            "fr" | "fr-fr" => Self::FrFr,
            "ja" | "ja-jp" => Self::JaJp,
            "iso" => Self::Iso,
            _ => return Err(UnknownLocale(s.to_string())),
        };
        Ok(locale)
    }
}

impl fmt::Display for DateLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for DateLocale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for DateLocale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        assert_eq!(
            CalendarDate::parse("2024-06-15"),
            Some(CalendarDate::new(2024, 6, 15))
        );
    }

    #[test]
    fn test_parse_date_time_variants() {
        let expected = Some(CalendarDate::new(2023, 1, 9));
        assert_eq!(CalendarDate::parse("2023-01-09T10:30:00Z"), expected);
        assert_eq!(CalendarDate::parse("2023-01-09T10:30"), expected);
        assert_eq!(CalendarDate::parse("2023-01-09 10:30:00.123"), expected);
        assert_eq!(CalendarDate::parse("2023-01-09T23:59:59+09:00"), expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(CalendarDate::parse(""), None);
        assert_eq!(CalendarDate::parse("yesterday"), None);
        assert_eq!(CalendarDate::parse("2024/06/15"), None);
        assert_eq!(CalendarDate::parse("2024-06-15Tnoon"), None);
        assert_eq!(CalendarDate::parse("2024-06-15T25:00:00Z"), None);
        assert_eq!(CalendarDate::parse("2024-06-15T10:00:00+0900"), None);
    }

    #[test]
    fn test_parse_rejects_impossible_days() {
        assert_eq!(CalendarDate::parse("2023-02-29"), None);
        assert_eq!(CalendarDate::parse("2024-04-31"), None);
        assert_eq!(CalendarDate::parse("2024-13-01"), None);
        assert!(CalendarDate::parse("2024-02-29").is_some());
        assert!(CalendarDate::parse("2000-02-29").is_some());
        assert!(CalendarDate::parse("1900-02-29").is_none());
    }

    #[test]
    fn test_format_short_per_locale() {
        let date = CalendarDate::new(2024, 6, 5);
        assert_eq!(DateLocale::EnUs.format_short(date), "6/5/2024");
        assert_eq!(DateLocale::EnGb.format_short(date), "05/06/2024");
        assert_eq!(DateLocale::DeDe.format_short(date), "5.6.2024");
        assert_eq!(DateLocale::FrFr.format_short(date), "05/06/2024");
        assert_eq!(DateLocale::JaJp.format_short(date), "2024/6/5");
        assert_eq!(DateLocale::Iso.format_short(date), "2024-06-05");
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("en-US".parse(), Ok(DateLocale::EnUs));
        assert_eq!("en_gb".parse(), Ok(DateLocale::EnGb));
        assert_eq!("de".parse(), Ok(DateLocale::DeDe));
        assert_eq!("ISO".parse(), Ok(DateLocale::Iso));
        assert!("tlh".parse::<DateLocale>().is_err());
    }

    #[test]
    fn test_locale_tag_round_trips() {
        for locale in DateLocale::ALL {
            assert_eq!(locale.tag().parse(), Ok(locale));
        }
    }
}
