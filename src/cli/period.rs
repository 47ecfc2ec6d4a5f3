//! Period CLI commands
//!
//! Shows the current period of a branch, the periods a picker would offer,
//! and formats explicit selections.

use chrono::NaiveDate;
use clap::Subcommand;

use super::args::PeriodArgs;
use crate::config::settings::Settings;
use crate::display::format_period_status_list;
use crate::error::{ComplianceError, ComplianceResult};
use crate::models::AuditFrequency;
use crate::periods;
use crate::services::{BranchService, SubmissionService};
use crate::storage::Storage;

/// Period subcommands
#[derive(Subcommand)]
pub enum PeriodCommands {
    /// Show the current audit period of a branch
    Current {
        /// Branch name or ID
        branch: String,
    },
    /// List the selectable periods of a branch and their submission state
    List {
        /// Branch name or ID
        branch: String,
    },
    /// Show the picker options for a frequency
    Options {
        /// Audit frequency
        #[arg(short, long)]
        frequency: String,
        /// Limit to one year (months are only listed per year)
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Format an explicit selection as a period key
    Format {
        /// Audit frequency
        #[arg(short, long)]
        frequency: String,
        #[command(flatten)]
        period: PeriodArgs,
    },
}

/// Handle a period command
pub fn handle_period_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: PeriodCommands,
) -> ComplianceResult<()> {
    let branches = BranchService::new(storage, settings);
    let submissions = SubmissionService::new(storage, settings);

    match cmd {
        PeriodCommands::Current { branch } => {
            let branch = branches.require(&branch)?;
            match submissions.current_period(&branch, today) {
                Some(period) => {
                    let decision = submissions.check(&branch, &period.to_string())?;
                    println!("{}", period);
                    println!("  {}", periods::period_label(&period));
                    println!("  {}", decision.reason());
                }
                None => println!(
                    "Branch '{}' has no usable audit frequency; no period available.",
                    branch.name
                ),
            }
        }

        PeriodCommands::List { branch } => {
            let branch = branches.require(&branch)?;
            let available = submissions.available_periods(&branch, today)?;
            println!("{}", format_period_status_list(&available));
        }

        PeriodCommands::Options { frequency, year } => {
            let frequency = parse_frequency(&frequency)?;
            let lookback = settings.lookback_years;

            let options: Vec<(String, String)> = match (frequency, year) {
                (AuditFrequency::Monthly, Some(year)) => periods::list_months(year, today)
                    .into_iter()
                    .map(|o| ((o.value + 1).to_string(), o.label))
                    .collect(),
                (AuditFrequency::Quarterly, _) => periods::list_quarters_within(today, lookback)
                    .into_iter()
                    .filter(|o| year.map_or(true, |y| o.value.year() == y))
                    .map(|o| (o.value.to_string(), o.label))
                    .collect(),
                (AuditFrequency::HalfYearly, _) => periods::list_halves_within(today, lookback)
                    .into_iter()
                    .filter(|o| year.map_or(true, |y| o.value.year() == y))
                    .map(|o| (o.value.to_string(), o.label))
                    .collect(),
                (AuditFrequency::Monthly | AuditFrequency::Yearly, _) => {
                    periods::list_years_within(today, lookback)
                        .into_iter()
                        .filter(|y| year.map_or(true, |wanted| *y == wanted))
                        .map(|y| (y.to_string(), y.to_string()))
                        .collect()
                }
            };

            if options.is_empty() {
                println!("No options available.");
            }
            for (value, label) in options {
                println!("{:<9}  {}", value, label);
            }
        }

        PeriodCommands::Format { frequency, period } => {
            let selection = period.to_selection()?.ok_or_else(|| {
                ComplianceError::Validation("--year is required".into())
            })?;

            match periods::format_period(AuditFrequency::parse(&frequency), &selection)? {
                Some(period) => println!("{}", period),
                None => println!("(none)"),
            }
        }
    }

    Ok(())
}

fn parse_frequency(label: &str) -> ComplianceResult<AuditFrequency> {
    AuditFrequency::parse(label).ok_or_else(|| {
        ComplianceError::Validation(format!("Unknown audit frequency '{}'", label))
    })
}
