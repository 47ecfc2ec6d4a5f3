//! Submission CLI commands

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use super::args::PeriodArgs;
use crate::config::settings::Settings;
use crate::display::{format_submission_details, format_submission_list};
use crate::error::{ComplianceError, ComplianceResult};
use crate::models::ComplianceResponse;
use crate::services::{BranchService, SubmissionService, SubmitRequest};
use crate::storage::Storage;

/// Arguments of `submit`
#[derive(Args)]
pub struct SubmitArgs {
    /// Branch name or ID
    pub branch: String,

    /// Period to submit for; defaults to the current period
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Who is submitting (defaults to the configured auditor name)
    #[arg(long)]
    pub by: Option<String>,

    /// Checklist answer as ACT::QUESTION=STATUS[:REMARKS] (repeatable)
    #[arg(short, long = "response")]
    pub responses: Vec<String>,
}

/// Submission subcommands
#[derive(Subcommand)]
pub enum SubmissionCommands {
    /// List submissions of a branch
    List {
        /// Branch name or ID
        branch: String,
    },
    /// Check whether a period key may still be submitted
    Check {
        /// Branch name or ID
        branch: String,
        /// Period key, compared exactly (e.g. 2023-Q3)
        period: String,
    },
    /// Show a submission with its responses
    Show {
        /// Submission ID
        id: String,
    },
}

/// Handle `submit`
pub fn handle_submit_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    args: SubmitArgs,
) -> ComplianceResult<()> {
    let branch = BranchService::new(storage, settings).require(&args.branch)?;

    let responses = args
        .responses
        .iter()
        .map(|r| ComplianceResponse::parse(r).map_err(ComplianceError::Validation))
        .collect::<ComplianceResult<Vec<_>>>()?;

    let request = SubmitRequest {
        selection: args.period.to_selection()?,
        submitted_by: args.by,
        responses,
    };

    let record = SubmissionService::new(storage, settings).submit(&branch, request, today)?;

    println!(
        "Submitted {} for '{}' ({} responses)",
        record.period.as_deref().unwrap_or(""),
        branch.name,
        record.responses.len()
    );
    println!("  ID: {}", record.id);

    Ok(())
}

/// Handle a submission command
pub fn handle_submission_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SubmissionCommands,
) -> ComplianceResult<()> {
    let branches = BranchService::new(storage, settings);
    let service = SubmissionService::new(storage, settings);

    match cmd {
        SubmissionCommands::List { branch } => {
            let branch = branches.require(&branch)?;
            let records = service.list(&branch)?;
            println!("{}", format_submission_list(&records, &settings.date_format));
        }

        SubmissionCommands::Check { branch, period } => {
            let branch = branches.require(&branch)?;
            let decision = service.check(&branch, &period)?;
            if decision.is_allowed() {
                println!("Allowed: {}", decision.reason());
            } else {
                println!("Blocked: {}", decision.reason());
            }
        }

        SubmissionCommands::Show { id } => {
            let record = service.find(&id)?;
            let branch = storage.branches.get(record.branch_id)?;
            print!(
                "{}",
                format_submission_details(&record, branch.as_ref(), &settings.date_format)
            );
        }
    }

    Ok(())
}
