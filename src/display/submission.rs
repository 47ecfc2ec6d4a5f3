//! Submission and period display formatting

use super::format_timestamp;
use crate::models::{Branch, SubmissionRecord};
use crate::periods::period_label;
use crate::services::PeriodStatus;

/// Format the selectable periods of a branch with their submission state
pub fn format_period_status_list(periods: &[PeriodStatus]) -> String {
    if periods.is_empty() {
        return "No periods available.".to_string();
    }

    let label_width = periods
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<9}  {:<label_width$}  {}\n",
        "Period", "Label", "Status",
    ));
    output.push_str(&format!("{:-<9}  {:-<label_width$}  {:-<9}\n", "", "", ""));

    for status in periods {
        output.push_str(&format!(
            "{:<9}  {:<label_width$}  {}\n",
            status.period.to_string(),
            status.label,
            if status.submitted { "Submitted" } else { "Open" },
        ));
    }

    output
}

/// Format a branch's submissions as a table
pub fn format_submission_list(submissions: &[SubmissionRecord], date_format: &str) -> String {
    if submissions.is_empty() {
        return "No submissions found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<9}  {:<16}  {:>9}  {}\n",
        "ID", "Period", "Submitted", "Responses", "By",
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<9}  {:-<16}  {:->9}  {:-<10}\n",
        "", "", "", "", "",
    ));

    for submission in submissions {
        let period = submission.period.as_deref().unwrap_or("(none)");
        let marker = if submission.is_combined_submission { "" } else { "*" };
        let submitted = submission
            .timestamp
            .map(|t| format_timestamp(&t, date_format))
            .unwrap_or_default();

        output.push_str(&format!(
            "{:<12}  {:<9}  {:<16}  {:>9}  {}\n",
            submission.id.to_string(),
            format!("{}{}", period, marker),
            submitted,
            submission.responses.len(),
            submission.submitted_by,
        ));
    }

    if submissions.iter().any(|s| !s.is_combined_submission) {
        output.push_str("\n* not a combined submission\n");
    }

    output
}

/// Format a single submission with its responses
pub fn format_submission_details(
    submission: &SubmissionRecord,
    branch: Option<&Branch>,
    date_format: &str,
) -> String {
    let mut output = String::new();

    let period = submission.period.as_deref().unwrap_or("(none)");
    output.push_str(&format!("Submission: {}\n", submission.id));
    output.push_str(&format!(
        "  Branch:    {}\n",
        branch
            .map(|b| b.name.clone())
            .unwrap_or_else(|| submission.branch_id.to_string())
    ));
    match submission.parsed_period() {
        Some(parsed) => output.push_str(&format!(
            "  Period:    {} ({})\n",
            period,
            period_label(&parsed)
        )),
        None => output.push_str(&format!("  Period:    {}\n", period)),
    }
    output.push_str(&format!(
        "  Combined:  {}\n",
        if submission.is_combined_submission { "Yes" } else { "No" }
    ));
    if let Some(timestamp) = submission.timestamp {
        output.push_str(&format!(
            "  Submitted: {} UTC\n",
            format_timestamp(&timestamp, date_format)
        ));
    }
    if !submission.submitted_by.is_empty() {
        output.push_str(&format!("  By:        {}\n", submission.submitted_by));
    }

    if submission.responses.is_empty() {
        return output;
    }

    output.push('\n');
    for response in &submission.responses {
        output.push_str(&format!(
            "  [{}] {} :: {}\n",
            response.status, response.act, response.question
        ));
        if !response.remarks.is_empty() {
            output.push_str(&format!("        {}\n", response.remarks));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuditFrequency, BranchId, ComplianceResponse, Period};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_period_status_list() {
        let periods = vec![
            PeriodStatus {
                period: Period::quarterly(2023, 3),
                label: "Q3 2023 (Jul-Sep)".into(),
                submitted: true,
            },
            PeriodStatus {
                period: Period::quarterly(2023, 2),
                label: "Q2 2023 (Apr-Jun)".into(),
                submitted: false,
            },
        ];

        let output = format_period_status_list(&periods);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[2].starts_with("2023-Q3"));
        assert!(lines[2].ends_with("Submitted"));
        assert!(lines[3].ends_with("Open"));
    }

    #[test]
    fn test_format_submission_list_marks_non_combined() {
        let branch_id = BranchId::new();
        let combined = SubmissionRecord::combined(branch_id, Period::monthly(2023, 1), "Asha");
        let mut partial = SubmissionRecord::combined(branch_id, Period::monthly(2023, 2), "Ravi");
        partial.is_combined_submission = false;

        let output = format_submission_list(&[combined, partial], "%Y-%m-%d");
        assert!(output.contains("2023-02*"));
        assert!(output.contains("not a combined submission"));
    }

    #[test]
    fn test_format_submission_details() {
        let branch = Branch::new("Depot", "Acme", AuditFrequency::Monthly);
        let mut record = SubmissionRecord::combined(branch.id, Period::monthly(2023, 3), "Asha");
        record.responses = vec![ComplianceResponse::parse("PF Act::Challan paid=no:late").unwrap()];

        let output = format_submission_details(&record, Some(&branch), "%Y-%m-%d");
        assert!(output.contains("Branch:    Depot"));
        assert!(output.contains("2023-03 (March 2023)"));
        assert!(output.contains("[Non-Compliant] PF Act :: Challan paid"));
        assert!(output.contains("late"));
    }

    #[test]
    fn test_submission_dates_follow_date_format() {
        let branch = Branch::new("Depot", "Acme", AuditFrequency::Monthly);
        let mut record = SubmissionRecord::combined(branch.id, Period::monthly(2023, 8), "Asha");
        record.timestamp = Some(Utc.with_ymd_and_hms(2023, 8, 15, 10, 30, 0).unwrap());

        let details = format_submission_details(&record, Some(&branch), "%d/%m/%Y");
        assert!(details.contains("Submitted: 15/08/2023 10:30 UTC"));

        let list = format_submission_list(&[record], "%d.%m.%Y");
        assert!(list.contains("15.08.2023 10:30"));
    }
}
