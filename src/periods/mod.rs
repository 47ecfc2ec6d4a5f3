//! Audit period rules
//!
//! The pure core of the application. Every function here is a deterministic
//! function of its arguments; the reference date is always passed in.
//!
//! - `resolver`: frequency + date or selection -> canonical `Period`
//! - `enumerator`: the periods a picker may offer (never future ones)
//! - `guard`: whether a combined submission for a period may be made

pub mod enumerator;
pub mod guard;
pub mod resolver;

pub use enumerator::{
    is_selectable, list_halves, list_halves_within, list_months, list_periods, list_quarters,
    list_quarters_within, list_years, list_years_within, month_name, period_label, PeriodOption,
    LOOKBACK_YEARS, MAX_LOOKBACK_YEARS,
};
pub use guard::{can_submit, check_submission, SubmissionDecision};
pub use resolver::{current_period, format_period, half_of, quarter_of};
