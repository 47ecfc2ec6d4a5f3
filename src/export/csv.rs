//! CSV export
//!
//! Flattens submissions to one row per checklist response. A submission
//! without responses still gets a single row so every period shows up.

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::error::{ComplianceError, ComplianceResult};
use crate::models::{Branch, BranchId};
use crate::storage::Storage;

#[derive(Debug, Serialize)]
struct SubmissionRow<'a> {
    #[serde(rename = "Submission ID")]
    submission_id: String,
    #[serde(rename = "Branch")]
    branch: &'a str,
    #[serde(rename = "Company")]
    company: &'a str,
    #[serde(rename = "Frequency")]
    frequency: &'a str,
    #[serde(rename = "Period")]
    period: &'a str,
    #[serde(rename = "Combined")]
    combined: bool,
    #[serde(rename = "Submitted At")]
    submitted_at: String,
    #[serde(rename = "Submitted By")]
    submitted_by: &'a str,
    #[serde(rename = "Act")]
    act: &'a str,
    #[serde(rename = "Question")]
    question: &'a str,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Remarks")]
    remarks: &'a str,
}

fn export_error(e: impl ToString) -> ComplianceError {
    ComplianceError::Export(e.to_string())
}

/// Export all submissions to CSV
pub fn export_submissions_csv<W: Write>(storage: &Storage, writer: W) -> ComplianceResult<()> {
    let branches: HashMap<BranchId, Branch> = storage
        .branches
        .get_all()?
        .into_iter()
        .map(|b| (b.id, b))
        .collect();

    let mut submissions = storage.submissions.get_all()?;
    submissions.sort_by(|a, b| {
        let name = |id: &BranchId| branches.get(id).map(|b| b.name.as_str()).unwrap_or("");
        name(&a.branch_id)
            .cmp(&name(&b.branch_id))
            .then(a.parsed_period().cmp(&b.parsed_period()))
            .then(a.timestamp.cmp(&b.timestamp))
    });

    let mut csv_writer = ::csv::Writer::from_writer(writer);

    for submission in &submissions {
        let branch = branches.get(&submission.branch_id);
        let base = SubmissionRow {
            submission_id: submission.id.to_string(),
            branch: branch.map(|b| b.name.as_str()).unwrap_or("Unknown"),
            company: branch.map(|b| b.company.as_str()).unwrap_or(""),
            frequency: branch
                .and_then(|b| b.audit_frequency.as_deref())
                .unwrap_or(""),
            period: submission.period.as_deref().unwrap_or(""),
            combined: submission.is_combined_submission,
            submitted_at: submission
                .timestamp
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
            submitted_by: &submission.submitted_by,
            act: "",
            question: "",
            status: String::new(),
            remarks: "",
        };

        if submission.responses.is_empty() {
            csv_writer.serialize(&base).map_err(export_error)?;
            continue;
        }

        for response in &submission.responses {
            let row = SubmissionRow {
                submission_id: base.submission_id.clone(),
                submitted_at: base.submitted_at.clone(),
                act: &response.act,
                question: &response.question,
                status: response.status.to_string(),
                remarks: &response.remarks,
                ..base
            };
            csv_writer.serialize(&row).map_err(export_error)?;
        }
    }

    csv_writer.flush().map_err(export_error)?;
    Ok(())
}
