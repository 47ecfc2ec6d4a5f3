//! Period resolution
//!
//! Maps a frequency plus a reference date, or a frequency plus an explicit
//! picker selection, to the canonical `Period`.

use chrono::{Datelike, NaiveDate};

use crate::error::{ComplianceError, ComplianceResult};
use crate::models::{AuditFrequency, Period, PeriodSelection};

/// Quarter (1-4) containing a 1-indexed month
pub fn quarter_of(month: u32) -> u32 {
    month.div_ceil(3)
}

/// Half (1-2) containing a 1-indexed month
pub fn half_of(month: u32) -> u32 {
    if month <= 6 {
        1
    } else {
        2
    }
}

/// The period that `now` falls in for the given frequency
pub fn current_period(frequency: AuditFrequency, now: NaiveDate) -> Period {
    let year = now.year();
    let month = now.month();

    match frequency {
        AuditFrequency::Monthly => Period::monthly(year, month),
        AuditFrequency::Quarterly => Period::quarterly(year, quarter_of(month)),
        AuditFrequency::HalfYearly => Period::half_yearly(year, half_of(month)),
        AuditFrequency::Yearly => Period::yearly(year),
    }
}

/// Turn an explicit picker selection into a period
///
/// Returns `Ok(None)` when the frequency is unresolved: no period exists and
/// the caller should show no picker. A selection that does not fit the
/// frequency is an `InvalidSelection` error.
pub fn format_period(
    frequency: Option<AuditFrequency>,
    selection: &PeriodSelection,
) -> ComplianceResult<Option<Period>> {
    let Some(frequency) = frequency else {
        return Ok(None);
    };

    let invalid = |reason: String| ComplianceError::InvalidSelection {
        frequency: frequency.label(),
        reason,
    };

    if !(0..=9999).contains(&selection.year) {
        return Err(invalid(format!("year {} is out of range", selection.year)));
    }

    let PeriodSelection {
        year,
        month0,
        quarter,
        half,
    } = *selection;

    let period = match frequency {
        AuditFrequency::Monthly => {
            reject(quarter, "quarter").map_err(invalid)?;
            reject(half, "half").map_err(invalid)?;
            let month0 = month0.ok_or_else(|| invalid("a month is required".into()))?;
            if month0 > 11 {
                return Err(invalid(format!("month index {} is out of range", month0)));
            }
            Period::monthly(year, month0 + 1)
        }
        AuditFrequency::Quarterly => {
            reject(month0, "month").map_err(invalid)?;
            reject(half, "half").map_err(invalid)?;
            let quarter = quarter.ok_or_else(|| invalid("a quarter is required".into()))?;
            if !(1..=4).contains(&quarter) {
                return Err(invalid(format!("quarter {} is out of range", quarter)));
            }
            Period::quarterly(year, quarter)
        }
        AuditFrequency::HalfYearly => {
            reject(month0, "month").map_err(invalid)?;
            reject(quarter, "quarter").map_err(invalid)?;
            let half = half.ok_or_else(|| invalid("a half is required".into()))?;
            if !(1..=2).contains(&half) {
                return Err(invalid(format!("half {} is out of range", half)));
            }
            Period::half_yearly(year, half)
        }
        AuditFrequency::Yearly => {
            reject(month0, "month").map_err(invalid)?;
            reject(quarter, "quarter").map_err(invalid)?;
            reject(half, "half").map_err(invalid)?;
            Period::yearly(year)
        }
    };

    Ok(Some(period))
}

fn reject(value: Option<u32>, unit: &str) -> Result<(), String> {
    match value {
        Some(_) => Err(format!("a {} cannot be selected", unit)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_current_monthly() {
        assert_eq!(
            current_period(AuditFrequency::Monthly, date(2023, 3, 14)).to_string(),
            "2023-03"
        );
    }

    #[test]
    fn test_current_quarterly() {
        assert_eq!(
            current_period(AuditFrequency::Quarterly, date(2023, 8, 1)).to_string(),
            "2023-Q3"
        );
        assert_eq!(
            current_period(AuditFrequency::Quarterly, date(2023, 12, 31)).to_string(),
            "2023-Q4"
        );
    }

    #[test]
    fn test_current_half_yearly_boundary() {
        assert_eq!(
            current_period(AuditFrequency::HalfYearly, date(2024, 6, 30)).to_string(),
            "2024-H1"
        );
        assert_eq!(
            current_period(AuditFrequency::HalfYearly, date(2024, 7, 1)).to_string(),
            "2024-H2"
        );
    }

    #[test]
    fn test_current_yearly() {
        assert_eq!(
            current_period(AuditFrequency::Yearly, date(2025, 1, 1)).to_string(),
            "2025"
        );
    }

    #[test]
    fn test_current_period_is_deterministic() {
        let now = date(2023, 8, 20);
        for frequency in AuditFrequency::ALL {
            assert_eq!(current_period(frequency, now), current_period(frequency, now));
        }
    }

    #[test]
    fn test_quarter_and_half_of_every_month() {
        let quarters: Vec<u32> = (1..=12).map(quarter_of).collect();
        assert_eq!(quarters, vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4]);
        let halves: Vec<u32> = (1..=12).map(half_of).collect();
        assert_eq!(halves, vec![1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2]);
    }

    #[test]
    fn test_format_each_frequency() {
        let monthly =
            format_period(Some(AuditFrequency::Monthly), &PeriodSelection::month(2023, 0));
        assert_eq!(monthly.unwrap(), Some(Period::monthly(2023, 1)));

        let quarterly =
            format_period(Some(AuditFrequency::Quarterly), &PeriodSelection::quarter(2023, 2));
        assert_eq!(quarterly.unwrap().unwrap().to_string(), "2023-Q2");

        let half = format_period(Some(AuditFrequency::HalfYearly), &PeriodSelection::half(2022, 2));
        assert_eq!(half.unwrap().unwrap().to_string(), "2022-H2");

        let yearly = format_period(Some(AuditFrequency::Yearly), &PeriodSelection::year(2021));
        assert_eq!(yearly.unwrap().unwrap().to_string(), "2021");
    }

    #[test]
    fn test_unresolved_frequency_yields_no_period() {
        let result = format_period(None, &PeriodSelection::month(2023, 4)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_mismatched_selection_is_invalid() {
        let err = format_period(Some(AuditFrequency::Yearly), &PeriodSelection::month(2023, 4))
            .unwrap_err();
        assert!(matches!(err, ComplianceError::InvalidSelection { .. }));

        let err = format_period(Some(AuditFrequency::Monthly), &PeriodSelection::quarter(2023, 1))
            .unwrap_err();
        assert!(matches!(err, ComplianceError::InvalidSelection { .. }));

        let err = format_period(Some(AuditFrequency::Quarterly), &PeriodSelection::year(2023))
            .unwrap_err();
        assert!(err.to_string().contains("a quarter is required"));
    }

    #[test]
    fn test_out_of_range_sub_units() {
        let cases = [
            (AuditFrequency::Monthly, PeriodSelection::month(2023, 12)),
            (AuditFrequency::Quarterly, PeriodSelection::quarter(2023, 0)),
            (AuditFrequency::HalfYearly, PeriodSelection::half(2023, 3)),
            (AuditFrequency::Yearly, PeriodSelection::year(12345)),
        ];
        for (frequency, selection) in cases {
            assert!(format_period(Some(frequency), &selection).is_err());
        }
    }
}
