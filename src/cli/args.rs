//! Shared CLI arguments

use clap::Args;

use crate::error::{ComplianceError, ComplianceResult};
use crate::models::PeriodSelection;

/// Explicit period choice: a year plus at most one sub-unit
#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Calendar year (e.g. 2023)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Month, 1-12
    #[arg(short, long, conflicts_with_all = ["quarter", "half"])]
    pub month: Option<u32>,

    /// Quarter, Q1-Q4 (or 1-4)
    #[arg(short, long, conflicts_with = "half")]
    pub quarter: Option<String>,

    /// Half year, H1-H2 (or 1-2)
    #[arg(long)]
    pub half: Option<String>,
}

impl PeriodArgs {
    /// Whether any part of a period was given
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.quarter.is_none() && self.half.is_none()
    }

    /// Convert to a picker selection; `None` when nothing was given
    pub fn to_selection(&self) -> ComplianceResult<Option<PeriodSelection>> {
        if self.is_empty() {
            return Ok(None);
        }

        let year = self
            .year
            .ok_or_else(|| ComplianceError::Validation("--year is required with a period".into()))?;

        let month0 = match self.month {
            Some(month @ 1..=12) => Some(month - 1),
            Some(month) => {
                return Err(ComplianceError::Validation(format!(
                    "Month must be between 1 and 12, got {}",
                    month
                )))
            }
            None => None,
        };

        let quarter = match &self.quarter {
            Some(label) => Some(PeriodSelection::parse_quarter_label(label).ok_or_else(|| {
                ComplianceError::Validation(format!("Invalid quarter '{}'", label))
            })?),
            None => None,
        };

        let half = match &self.half {
            Some(label) => Some(PeriodSelection::parse_half_label(label).ok_or_else(|| {
                ComplianceError::Validation(format!("Invalid half '{}'", label))
            })?),
            None => None,
        };

        Ok(Some(PeriodSelection {
            year,
            month0,
            quarter,
            half,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_args_mean_current_period() {
        assert_eq!(PeriodArgs::default().to_selection().unwrap(), None);
    }

    #[test]
    fn test_month_is_converted_to_zero_based() {
        let args = PeriodArgs {
            year: Some(2023),
            month: Some(3),
            ..PeriodArgs::default()
        };
        assert_eq!(
            args.to_selection().unwrap(),
            Some(PeriodSelection::month(2023, 2))
        );
    }

    #[test]
    fn test_quarter_label() {
        let args = PeriodArgs {
            year: Some(2023),
            quarter: Some("Q4".into()),
            ..PeriodArgs::default()
        };
        assert_eq!(
            args.to_selection().unwrap(),
            Some(PeriodSelection::quarter(2023, 4))
        );
    }

    #[test]
    fn test_sub_unit_without_year_rejected() {
        let args = PeriodArgs {
            half: Some("H1".into()),
            ..PeriodArgs::default()
        };
        assert!(args.to_selection().unwrap_err().is_validation());

        let args = PeriodArgs {
            year: Some(2023),
            month: Some(13),
            ..PeriodArgs::default()
        };
        assert!(args.to_selection().unwrap_err().is_validation());
    }
}
