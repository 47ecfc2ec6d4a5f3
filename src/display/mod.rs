//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for branches, periods and submissions.

pub mod branch;
pub mod submission;

use std::fmt::Write;

use chrono::{DateTime, Utc};

pub use branch::{format_branch_details, format_branch_list};
pub use submission::{
    format_period_status_list, format_submission_details, format_submission_list,
};

/// Format a timestamp as `<date_format> HH:MM`
///
/// Falls back to RFC 3339 when `date_format` is not a usable strftime string.
pub fn format_timestamp(timestamp: &DateTime<Utc>, date_format: &str) -> String {
    let mut output = String::new();
    match write!(output, "{}", timestamp.format(&format!("{} %H:%M", date_format))) {
        Ok(()) => output,
        Err(_) => timestamp.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let timestamp = Utc.with_ymd_and_hms(2023, 8, 15, 10, 30, 0).unwrap();
        assert_eq!(format_timestamp(&timestamp, "%Y-%m-%d"), "2023-08-15 10:30");
        assert_eq!(format_timestamp(&timestamp, "%d/%m/%Y"), "15/08/2023 10:30");
    }

    #[test]
    fn test_invalid_format_falls_back() {
        let timestamp = Utc.with_ymd_and_hms(2023, 8, 15, 10, 30, 0).unwrap();
        assert_eq!(
            format_timestamp(&timestamp, "%Q"),
            "2023-08-15T10:30:00+00:00"
        );
    }
}
