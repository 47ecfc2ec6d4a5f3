//! Period enumeration for the period picker
//!
//! Produces the selectable periods for a frequency: every period from the
//! start of the lookback window up to and including the current one, never a
//! future period. Lists are most recent first.
//!
//! There is no floor at the branch's creation date, so a branch created this
//! year is still offered periods from earlier years.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::resolver::current_period;
use crate::models::{AuditFrequency, Period};

/// Years before the current one that the picker reaches back (inclusive)
pub const LOOKBACK_YEARS: u32 = 10;

/// Largest lookback honoured; wider windows are clamped to it
pub const MAX_LOOKBACK_YEARS: u32 = 100;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One entry of a picker: display label plus the value submitted back
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodOption<T> {
    pub label: String,
    pub value: T,
}

/// English name of a zero-based month
pub fn month_name(month0: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month0 as usize).copied()
}

/// `[now.year, now.year - 1, ..., now.year - 10]`
pub fn list_years(now: NaiveDate) -> Vec<i32> {
    list_years_within(now, LOOKBACK_YEARS)
}

/// Years from `now.year` back `lookback` years, most recent first
pub fn list_years_within(now: NaiveDate, lookback: u32) -> Vec<i32> {
    (earliest_year(now, lookback)..=now.year()).rev().collect()
}

/// Months selectable in `year`; values are zero-based
///
/// All twelve months for past years, January through the current month for
/// the current year, nothing for a future year.
pub fn list_months(year: i32, now: NaiveDate) -> Vec<PeriodOption<u32>> {
    let last_month0 = match year.cmp(&now.year()) {
        std::cmp::Ordering::Less => 11,
        std::cmp::Ordering::Equal => now.month0(),
        std::cmp::Ordering::Greater => return Vec::new(),
    };

    (0..=last_month0)
        .map(|month0| PeriodOption {
            label: MONTH_NAMES[month0 as usize].to_string(),
            value: month0,
        })
        .collect()
}

/// Quarters across the lookback window, current year capped at the current quarter
pub fn list_quarters(now: NaiveDate) -> Vec<PeriodOption<Period>> {
    list_quarters_within(now, LOOKBACK_YEARS)
}

/// Quarters across `lookback` years
pub fn list_quarters_within(now: NaiveDate, lookback: u32) -> Vec<PeriodOption<Period>> {
    to_options(list_periods(AuditFrequency::Quarterly, now, lookback))
}

/// Halves across the lookback window, current year capped at the current half
pub fn list_halves(now: NaiveDate) -> Vec<PeriodOption<Period>> {
    list_halves_within(now, LOOKBACK_YEARS)
}

/// Halves across `lookback` years
pub fn list_halves_within(now: NaiveDate, lookback: u32) -> Vec<PeriodOption<Period>> {
    to_options(list_periods(AuditFrequency::HalfYearly, now, lookback))
}

/// Every selectable period for a frequency, most recent first
pub fn list_periods(frequency: AuditFrequency, now: NaiveDate, lookback: u32) -> Vec<Period> {
    let earliest_year = earliest_year(now, lookback);
    let mut periods = Vec::new();
    let mut current = current_period(frequency, now);

    while current.year() >= earliest_year {
        periods.push(current);
        current = current.prev();
    }

    periods
}

/// Whether a period may be chosen at `now`
pub fn is_selectable(period: &Period, now: NaiveDate, lookback: u32) -> bool {
    let current = current_period(period.frequency(), now);
    *period <= current && period.year() >= earliest_year(now, lookback)
}

/// First year of the window, with `lookback` clamped to `MAX_LOOKBACK_YEARS`
fn earliest_year(now: NaiveDate, lookback: u32) -> i32 {
    let span = i32::try_from(lookback.min(MAX_LOOKBACK_YEARS)).unwrap_or(0);
    now.year().saturating_sub(span)
}

/// Human-readable label for a period
pub fn period_label(period: &Period) -> String {
    match period {
        Period::Monthly { year, month } => {
            let name = month.checked_sub(1).and_then(month_name).unwrap_or("?");
            format!("{} {}", name, year)
        }
        Period::Quarterly { year, quarter } => {
            let months = match quarter {
                1 => "Jan-Mar",
                2 => "Apr-Jun",
                3 => "Jul-Sep",
                _ => "Oct-Dec",
            };
            format!("Q{} {} ({})", quarter, year, months)
        }
        Period::HalfYearly { year, half } => {
            let months = if *half == 1 { "Jan-Jun" } else { "Jul-Dec" };
            format!("H{} {} ({})", half, year, months)
        }
        Period::Yearly { year } => year.to_string(),
    }
}

fn to_options(periods: Vec<Period>) -> Vec<PeriodOption<Period>> {
    periods
        .into_iter()
        .map(|period| PeriodOption {
            label: period_label(&period),
            value: period,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_list_years() {
        let years = list_years(date(2023, 3, 1));
        assert_eq!(years.len(), 11);
        assert_eq!(years.first(), Some(&2023));
        assert_eq!(years.last(), Some(&2013));
        assert!(years.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_list_months_current_year_stops_at_now() {
        let now = date(2023, 3, 10);
        let values: Vec<u32> = list_months(2023, now).iter().map(|o| o.value).collect();
        assert_eq!(values, vec![0, 1, 2]);
        assert_eq!(list_months(2023, now)[2].label, "March");
    }

    #[test]
    fn test_list_months_past_and_future_years() {
        let now = date(2023, 3, 10);
        assert_eq!(list_months(2022, now).len(), 12);
        assert!(list_months(2024, now).is_empty());
    }

    #[test]
    fn test_list_quarters() {
        let quarters = list_quarters(date(2023, 8, 1));
        assert_eq!(quarters.len(), 3 + 10 * 4);
        assert_eq!(quarters[0].value.to_string(), "2023-Q3");
        assert_eq!(quarters[2].value.to_string(), "2023-Q1");
        assert_eq!(quarters[3].value.to_string(), "2022-Q4");
        assert_eq!(quarters.last().unwrap().value.to_string(), "2013-Q1");
        assert!(quarters
            .iter()
            .all(|o| o.value <= Period::quarterly(2023, 3)));
    }

    #[test]
    fn test_list_halves() {
        let first_half = list_halves(date(2024, 6, 30));
        assert_eq!(first_half.len(), 1 + 10 * 2);
        assert_eq!(first_half[0].value.to_string(), "2024-H1");
        assert_eq!(first_half[1].value.to_string(), "2023-H2");

        let second_half = list_halves(date(2024, 7, 1));
        assert_eq!(second_half.len(), 2 + 10 * 2);
        assert_eq!(second_half[0].label, "H2 2024 (Jul-Dec)");
    }

    #[test]
    fn test_list_periods_yearly_matches_years() {
        let now = date(2023, 5, 5);
        let periods: Vec<i32> = list_periods(AuditFrequency::Yearly, now, LOOKBACK_YEARS)
            .iter()
            .map(|p| p.year())
            .collect();
        assert_eq!(periods, list_years(now));
    }

    #[test]
    fn test_list_periods_monthly_count() {
        let periods = list_periods(AuditFrequency::Monthly, date(2023, 3, 1), 1);
        assert_eq!(periods.len(), 3 + 12);
        assert_eq!(periods[0].to_string(), "2023-03");
        assert_eq!(periods.last().unwrap().to_string(), "2022-01");
    }

    #[test]
    fn test_is_selectable() {
        let now = date(2023, 8, 1);
        assert!(is_selectable(&Period::quarterly(2023, 3), now, LOOKBACK_YEARS));
        assert!(!is_selectable(&Period::quarterly(2023, 4), now, LOOKBACK_YEARS));
        assert!(!is_selectable(&Period::yearly(2012), now, LOOKBACK_YEARS));
        assert!(is_selectable(&Period::yearly(2013), now, LOOKBACK_YEARS));
    }

    #[test]
    fn test_oversized_lookback_is_clamped() {
        let now = date(2023, 8, 1);
        for lookback in [u32::MAX, 3_000_000_000, 2_147_483_648, 101] {
            let years = list_years_within(now, lookback);
            assert_eq!(years.len(), MAX_LOOKBACK_YEARS as usize + 1);
            assert_eq!(years.last(), Some(&1923));

            let periods = list_periods(AuditFrequency::Yearly, now, lookback);
            assert_eq!(periods.len(), years.len());
            assert!(is_selectable(&Period::quarterly(2023, 3), now, lookback));
            assert!(!is_selectable(&Period::yearly(1922), now, lookback));
        }
    }

    #[test]
    fn test_zero_lookback_is_current_year_only() {
        let now = date(2023, 8, 1);
        assert_eq!(list_years_within(now, 0), vec![2023]);
        assert_eq!(list_periods(AuditFrequency::HalfYearly, now, 0).len(), 2);
    }

    #[test]
    fn test_every_listed_period_round_trips() {
        let now = date(2023, 8, 1);
        for frequency in AuditFrequency::ALL {
            for period in list_periods(frequency, now, LOOKBACK_YEARS) {
                let parsed = Period::parse(&period.to_string()).unwrap();
                assert_eq!(parsed, period);
                assert_eq!(parsed.frequency(), frequency);
                assert_eq!(parsed.year(), period.year());
                assert_eq!(parsed.sub_unit(), period.sub_unit());
            }
        }
    }
}
