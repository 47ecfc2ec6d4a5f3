//! Audit period representation
//!
//! A period is one reporting interval for a given audit frequency. Its string
//! form is the key stored on submission documents, so `Display` and `parse`
//! must stay byte-for-byte stable:
//!
//! - Monthly: "2025-01"
//! - Quarterly: "2025-Q1"
//! - Half-yearly: "2025-H1"
//! - Yearly: "2025"

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::frequency::AuditFrequency;

/// Represents an audit period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    /// Calendar month, 1-12
    Monthly { year: i32, month: u32 },
    /// Calendar quarter, 1-4
    Quarterly { year: i32, quarter: u32 },
    /// Half year, 1-2
    HalfYearly { year: i32, half: u32 },
    /// Calendar year
    Yearly { year: i32 },
}

impl Period {
    /// Create a monthly period
    ///
    /// `month` must be 1-12; use `Period::parse` or `periods::format_period`
    /// for unchecked input.
    pub fn monthly(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month), "month {month} out of range 1-12");
        Self::Monthly { year, month }
    }

    /// Create a quarterly period; `quarter` must be 1-4
    pub fn quarterly(year: i32, quarter: u32) -> Self {
        debug_assert!((1..=4).contains(&quarter), "quarter {quarter} out of range 1-4");
        Self::Quarterly { year, quarter }
    }

    /// Create a half-yearly period; `half` must be 1 or 2
    pub fn half_yearly(year: i32, half: u32) -> Self {
        debug_assert!((1..=2).contains(&half), "half {half} out of range 1-2");
        Self::HalfYearly { year, half }
    }

    /// Create a yearly period
    pub fn yearly(year: i32) -> Self {
        Self::Yearly { year }
    }

    /// The frequency this period belongs to
    pub fn frequency(&self) -> AuditFrequency {
        match self {
            Self::Monthly { .. } => AuditFrequency::Monthly,
            Self::Quarterly { .. } => AuditFrequency::Quarterly,
            Self::HalfYearly { .. } => AuditFrequency::HalfYearly,
            Self::Yearly { .. } => AuditFrequency::Yearly,
        }
    }

    /// Calendar year of the period
    pub fn year(&self) -> i32 {
        match self {
            Self::Monthly { year, .. }
            | Self::Quarterly { year, .. }
            | Self::HalfYearly { year, .. }
            | Self::Yearly { year } => *year,
        }
    }

    /// Month, quarter or half number; `None` for yearly periods
    pub fn sub_unit(&self) -> Option<u32> {
        match self {
            Self::Monthly { month, .. } => Some(*month),
            Self::Quarterly { quarter, .. } => Some(*quarter),
            Self::HalfYearly { half, .. } => Some(*half),
            Self::Yearly { .. } => None,
        }
    }

    /// First calendar month (1-indexed) covered by the period
    fn first_month(&self) -> u32 {
        match self {
            Self::Monthly { month, .. } => *month,
            Self::Quarterly { quarter, .. } => quarter.saturating_sub(1) * 3 + 1,
            Self::HalfYearly { half, .. } => half.saturating_sub(1) * 6 + 1,
            Self::Yearly { .. } => 1,
        }
    }

    /// Number of calendar months covered by the period
    fn month_span(&self) -> u32 {
        match self.frequency() {
            AuditFrequency::Monthly => 1,
            AuditFrequency::Quarterly => 3,
            AuditFrequency::HalfYearly => 6,
            AuditFrequency::Yearly => 12,
        }
    }

    /// Get the start date of this period
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year(), self.first_month(), 1)
    }

    /// Get the end date of this period (inclusive)
    pub fn end_date(&self) -> Option<NaiveDate> {
        let last_month = self.first_month() + self.month_span() - 1;
        let next_start = if last_month == 12 {
            NaiveDate::from_ymd_opt(self.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year(), last_month + 1, 1)
        };
        next_start.map(|d| d - Duration::days(1))
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year()
            && date.month() >= self.first_month()
            && date.month() < self.first_month() + self.month_span()
    }

    /// Get the next period of the same frequency
    pub fn next(&self) -> Self {
        match *self {
            Self::Monthly { year, month: 12 } => Self::monthly(year + 1, 1),
            Self::Monthly { year, month } => Self::monthly(year, month + 1),
            Self::Quarterly { year, quarter: 4 } => Self::quarterly(year + 1, 1),
            Self::Quarterly { year, quarter } => Self::quarterly(year, quarter + 1),
            Self::HalfYearly { year, half: 2 } => Self::half_yearly(year + 1, 1),
            Self::HalfYearly { year, half } => Self::half_yearly(year, half + 1),
            Self::Yearly { year } => Self::yearly(year + 1),
        }
    }

    /// Get the previous period of the same frequency
    pub fn prev(&self) -> Self {
        match *self {
            Self::Monthly { year, month: 1 } => Self::monthly(year - 1, 12),
            Self::Monthly { year, month } => Self::monthly(year, month - 1),
            Self::Quarterly { year, quarter: 1 } => Self::quarterly(year - 1, 4),
            Self::Quarterly { year, quarter } => Self::quarterly(year, quarter - 1),
            Self::HalfYearly { year, half: 1 } => Self::half_yearly(year - 1, 2),
            Self::HalfYearly { year, half } => Self::half_yearly(year, half - 1),
            Self::Yearly { year } => Self::yearly(year - 1),
        }
    }

    /// Parse a period string, inferring the frequency from its shape
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        let (year_part, rest) = match s.split_once('-') {
            Some((year, rest)) => (year, Some(rest)),
            None => (s, None),
        };

        if year_part.len() != 4 || !year_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = year_part.parse().map_err(|_| invalid())?;

        let Some(rest) = rest else {
            return Ok(Self::yearly(year));
        };

        if let Some(n) = rest.strip_prefix('Q') {
            let quarter = parse_single_digit(n).ok_or_else(invalid)?;
            if !(1..=4).contains(&quarter) {
                return Err(PeriodParseError::OutOfRange {
                    unit: "quarter",
                    value: quarter,
                });
            }
            return Ok(Self::quarterly(year, quarter));
        }

        if let Some(n) = rest.strip_prefix('H') {
            let half = parse_single_digit(n).ok_or_else(invalid)?;
            if !(1..=2).contains(&half) {
                return Err(PeriodParseError::OutOfRange {
                    unit: "half",
                    value: half,
                });
            }
            return Ok(Self::half_yearly(year, half));
        }

        if rest.len() != 2 || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let month: u32 = rest.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::OutOfRange {
                unit: "month",
                value: month,
            });
        }
        Ok(Self::monthly(year, month))
    }

    /// Parse a period string that must belong to `frequency`
    pub fn parse_for(frequency: AuditFrequency, s: &str) -> Result<Self, PeriodParseError> {
        let period = Self::parse(s)?;
        if period.frequency() != frequency {
            return Err(PeriodParseError::WrongFrequency {
                period: s.to_string(),
                expected: frequency,
            });
        }
        Ok(period)
    }
}

fn parse_single_digit(s: &str) -> Option<u32> {
    let mut chars = s.chars();
    let digit = chars.next()?.to_digit(10)?;
    if chars.next().is_some() {
        return None;
    }
    Some(digit)
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Quarterly { year, quarter } => write!(f, "{:04}-Q{}", year, quarter),
            Self::HalfYearly { year, half } => write!(f, "{:04}-H{}", year, half),
            Self::Yearly { year } => write!(f, "{:04}", year),
        }
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Period {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.year(), self.first_month(), self.month_span()).cmp(&(
            other.year(),
            other.first_month(),
            other.month_span(),
        ))
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodParseError {
    #[error("Invalid period format: {0}")]
    InvalidFormat(String),

    #[error("Invalid {unit}: {value}")]
    OutOfRange { unit: &'static str, value: u32 },

    #[error("Period {period} is not a {expected} period")]
    WrongFrequency {
        period: String,
        expected: AuditFrequency,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats() {
        assert_eq!(Period::monthly(2023, 3).to_string(), "2023-03");
        assert_eq!(Period::quarterly(2023, 3).to_string(), "2023-Q3");
        assert_eq!(Period::half_yearly(2024, 1).to_string(), "2024-H1");
        assert_eq!(Period::yearly(2024).to_string(), "2024");
    }

    #[test]
    fn test_parse_infers_frequency() {
        assert_eq!(Period::parse("2023-03").unwrap(), Period::monthly(2023, 3));
        assert_eq!(Period::parse("2023-Q4").unwrap(), Period::quarterly(2023, 4));
        assert_eq!(Period::parse("2023-H2").unwrap(), Period::half_yearly(2023, 2));
        assert_eq!(Period::parse("2023").unwrap(), Period::yearly(2023));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let malformed = [
            "23-03", "2023-3", "2023-13", "2023-Q5", "2023-H3", "2023-q1", " 2023", "2023-Q12", "",
        ];
        for bad in malformed {
            assert!(Period::parse(bad).is_err(), "{bad:?} should not parse");
        }
        assert_eq!(
            Period::parse("2023-00"),
            Err(PeriodParseError::OutOfRange {
                unit: "month",
                value: 0
            })
        );
    }

    #[test]
    fn test_parse_for_checks_frequency() {
        assert!(Period::parse_for(AuditFrequency::Quarterly, "2023-Q1").is_ok());
        assert!(matches!(
            Period::parse_for(AuditFrequency::Monthly, "2023-Q1"),
            Err(PeriodParseError::WrongFrequency { .. })
        ));
    }

    #[test]
    fn test_date_bounds() {
        let q1 = Period::quarterly(2024, 1);
        assert_eq!(q1.start_date(), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(q1.end_date(), NaiveDate::from_ymd_opt(2024, 3, 31));

        let h2 = Period::half_yearly(2024, 2);
        assert_eq!(h2.start_date(), NaiveDate::from_ymd_opt(2024, 7, 1));
        assert_eq!(h2.end_date(), NaiveDate::from_ymd_opt(2024, 12, 31));

        let feb = Period::monthly(2024, 2);
        assert_eq!(feb.end_date(), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_contains() {
        let q3 = Period::quarterly(2023, 3);
        assert!(q3.contains(NaiveDate::from_ymd_opt(2023, 8, 15).unwrap()));
        assert!(!q3.contains(NaiveDate::from_ymd_opt(2023, 10, 1).unwrap()));
        assert!(!q3.contains(NaiveDate::from_ymd_opt(2022, 8, 15).unwrap()));
    }

    #[test]
    fn test_navigation_wraps_years() {
        assert_eq!(Period::monthly(2024, 12).next(), Period::monthly(2025, 1));
        assert_eq!(Period::quarterly(2025, 1).prev(), Period::quarterly(2024, 4));
        assert_eq!(Period::half_yearly(2024, 2).next(), Period::half_yearly(2025, 1));
        assert_eq!(Period::yearly(2024).prev(), Period::yearly(2023));
    }

    #[test]
    fn test_ordering_matches_string_order_within_frequency() {
        let mut periods = vec![
            Period::monthly(2023, 11),
            Period::monthly(2022, 12),
            Period::monthly(2023, 2),
        ];
        let mut strings: Vec<String> = periods.iter().map(|p| p.to_string()).collect();
        periods.sort();
        strings.sort();
        let sorted: Vec<String> = periods.iter().map(|p| p.to_string()).collect();
        assert_eq!(sorted, strings);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&Period::quarterly(2023, 3)).unwrap();
        assert_eq!(json, "\"2023-Q3\"");
        let back: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Period::quarterly(2023, 3));
        assert!(serde_json::from_str::<Period>("\"2023-Q9\"").is_err());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "quarter 0 out of range")]
    fn test_quarter_constructor_checks_range() {
        let _ = Period::quarterly(2023, 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "month 13 out of range")]
    fn test_month_constructor_checks_range() {
        let _ = Period::monthly(2023, 13);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "half 3 out of range")]
    fn test_half_constructor_checks_range() {
        let _ = Period::half_yearly(2023, 3);
    }
}
