//! Branch display formatting
//!
//! Formats branches for terminal output in table and detail views.

use super::format_timestamp;
use crate::models::Branch;
use crate::services::BranchSummary;

/// Format a list of branches as a table
pub fn format_branch_list(branches: &[Branch]) -> String {
    if branches.is_empty() {
        return "No branches found.".to_string();
    }

    let name_width = branches
        .iter()
        .map(|b| b.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let company_width = branches
        .iter()
        .map(|b| b.company.chars().count())
        .max()
        .unwrap_or(7)
        .max(7);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<company_width$}  {:<11}  {:>4}  {:<11}  {}\n",
        "Name",
        "Company",
        "Frequency",
        "Acts",
        "ID",
        "Status",
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<company_width$}  {:-<11}  {:->4}  {:-<11}  {:-<8}\n",
        "", "", "", "", "", "",
    ));

    for branch in branches {
        let frequency = match branch.frequency() {
            Some(frequency) => frequency.label().to_string(),
            None => "(unset)".to_string(),
        };

        output.push_str(&format!(
            "{:<name_width$}  {:<company_width$}  {:<11}  {:>4}  {:<11}  {}\n",
            branch.name,
            branch.company,
            frequency,
            branch.acts.len(),
            branch.id.to_string(),
            if branch.archived { "Archived" } else { "" },
        ));
    }

    output
}

/// Format a single branch with its compliance overview
pub fn format_branch_details(
    branch: &Branch,
    summary: &BranchSummary,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Branch: {}\n", branch.name));
    output.push_str(&format!("  Company:    {}\n", branch.company));
    output.push_str(&format!("  ID:         {}\n", branch.id));
    output.push_str(&format!(
        "  Frequency:  {}\n",
        match (summary.frequency, branch.audit_frequency.as_deref()) {
            (Some(frequency), _) => frequency.label().to_string(),
            (None, Some(raw)) => format!("{} (unrecognised)", raw),
            (None, None) => "(unset)".to_string(),
        }
    ));
    output.push_str(&format!(
        "  Archived:   {}\n",
        if branch.archived { "Yes" } else { "No" }
    ));

    output.push('\n');
    if branch.acts.is_empty() {
        output.push_str("  Acts: (none assigned)\n");
    } else {
        output.push_str("  Acts:\n");
        for act in &branch.acts {
            output.push_str(&format!("    - {}\n", act));
        }
    }

    output.push('\n');
    match summary.current_period {
        Some(period) => output.push_str(&format!(
            "  Current Period:   {} ({})\n",
            period,
            if summary.current_submitted {
                "submitted"
            } else {
                "pending"
            }
        )),
        None => output.push_str("  Current Period:   none\n"),
    }
    output.push_str(&format!(
        "  Submissions:      {}\n",
        summary.total_submissions
    ));
    output.push_str(&format!(
        "  Missing Periods:  {}\n",
        summary.missing_periods.len()
    ));
    output.push_str(&format!(
        "  Responses:        {} compliant, {} non-compliant, {} n/a\n",
        summary.compliant, summary.non_compliant, summary.not_applicable
    ));

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {} UTC\n",
        format_timestamp(&branch.created_at, date_format)
    ));
    output.push_str(&format!(
        "  Modified: {} UTC\n",
        format_timestamp(&branch.updated_at, date_format)
    ));

    output
}
