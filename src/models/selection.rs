//! Period picker selection
//!
//! A `PeriodSelection` is the user's in-progress choice in a period picker:
//! a year plus at most one of month, quarter or half. It is never persisted;
//! `periods::format_period` turns it into a canonical `Period` once it is
//! checked against the branch's frequency.

use serde::{Deserialize, Serialize};

/// A user's period choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodSelection {
    /// Calendar year
    pub year: i32,

    /// Zero-based month as offered by the month picker (0 = January)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month0: Option<u32>,

    /// Quarter number, 1-4
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<u32>,

    /// Half number, 1-2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half: Option<u32>,
}

impl PeriodSelection {
    /// Select a whole year
    pub fn year(year: i32) -> Self {
        Self {
            year,
            ..Self::default()
        }
    }

    /// Select a month using the picker's zero-based month value
    pub fn month(year: i32, month0: u32) -> Self {
        Self {
            year,
            month0: Some(month0),
            ..Self::default()
        }
    }

    /// Select a quarter
    pub fn quarter(year: i32, quarter: u32) -> Self {
        Self {
            year,
            quarter: Some(quarter),
            ..Self::default()
        }
    }

    /// Select a half year
    pub fn half(year: i32, half: u32) -> Self {
        Self {
            year,
            half: Some(half),
            ..Self::default()
        }
    }

    /// Parse a quarter label such as "Q3" or "3"
    pub fn parse_quarter_label(label: &str) -> Option<u32> {
        let label = label.trim();
        let digits = label
            .strip_prefix('Q')
            .or_else(|| label.strip_prefix('q'))
            .unwrap_or(label);
        digits.parse().ok()
    }

    /// Parse a half label such as "H1" or "1"
    pub fn parse_half_label(label: &str) -> Option<u32> {
        let label = label.trim();
        let digits = label
            .strip_prefix('H')
            .or_else(|| label.strip_prefix('h'))
            .unwrap_or(label);
        digits.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_one_sub_unit() {
        let m = PeriodSelection::month(2023, 2);
        assert_eq!(m.month0, Some(2));
        assert!(m.quarter.is_none() && m.half.is_none());

        let y = PeriodSelection::year(2023);
        assert!(y.month0.is_none() && y.quarter.is_none() && y.half.is_none());
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!(PeriodSelection::parse_quarter_label("Q3"), Some(3));
        assert_eq!(PeriodSelection::parse_quarter_label("4"), Some(4));
        assert_eq!(PeriodSelection::parse_half_label("H2"), Some(2));
        assert_eq!(PeriodSelection::parse_half_label("second"), None);
    }
}
