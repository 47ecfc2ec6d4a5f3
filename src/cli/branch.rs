//! Branch CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_branch_details, format_branch_list};
use crate::error::ComplianceResult;
use crate::services::{BranchService, SubmissionService};
use crate::storage::Storage;

/// Branch subcommands
#[derive(Subcommand)]
pub enum BranchCommands {
    /// Add a new branch
    Add {
        /// Branch name
        name: String,
        /// Owning company
        #[arg(short, long, default_value = "")]
        company: String,
        /// Audit frequency (Monthly, Quarterly, Half-Yearly, Yearly)
        #[arg(short, long)]
        frequency: Option<String>,
        /// Act to assign (repeatable)
        #[arg(short, long = "act")]
        acts: Vec<String>,
    },
    /// List branches
    List {
        /// Include archived branches
        #[arg(short, long)]
        all: bool,
    },
    /// Show branch details and compliance overview
    Show {
        /// Branch name or ID
        branch: String,
    },
    /// Change a branch's audit frequency
    SetFrequency {
        /// Branch name or ID
        branch: String,
        /// New frequency
        frequency: String,
    },
    /// Assign an act to a branch
    AssignAct {
        /// Branch name or ID
        branch: String,
        /// Act name
        act: String,
    },
    /// Remove an act from a branch
    RemoveAct {
        /// Branch name or ID
        branch: String,
        /// Act name
        act: String,
    },
    /// Archive a branch
    Archive {
        /// Branch name or ID
        branch: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a branch command
pub fn handle_branch_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: BranchCommands,
) -> ComplianceResult<()> {
    let service = BranchService::new(storage, settings);

    match cmd {
        BranchCommands::Add {
            name,
            company,
            frequency,
            acts,
        } => {
            let mut branch = service.create(&name, &company, frequency.as_deref())?;
            for act in &acts {
                branch = service.assign_act(branch.id, act)?;
            }

            println!("Created branch: {} ({})", branch.name, branch.id);
            if let Some(frequency) = branch.frequency() {
                println!("  Frequency: {}", frequency);
            }
            if !branch.acts.is_empty() {
                println!("  Acts:      {}", branch.acts.join(", "));
            }
        }

        BranchCommands::List { all } => {
            let branches = service.list(all)?;
            println!("{}", format_branch_list(&branches));
        }

        BranchCommands::Show { branch } => {
            let branch = service.require(&branch)?;
            let summary = SubmissionService::new(storage, settings).summary(&branch, today)?;
            print!(
                "{}",
                format_branch_details(&branch, &summary, &settings.date_format)
            );
        }

        BranchCommands::SetFrequency { branch, frequency } => {
            let branch = service.require(&branch)?;
            let previous = branch.audit_frequency.clone().unwrap_or_else(|| "(unset)".into());
            let updated = service.set_frequency(branch.id, &frequency)?;
            println!(
                "Changed frequency of '{}': {} -> {}",
                updated.name,
                previous,
                updated.audit_frequency.as_deref().unwrap_or("(unset)")
            );
        }

        BranchCommands::AssignAct { branch, act } => {
            let branch = service.require(&branch)?;
            let updated = service.assign_act(branch.id, &act)?;
            println!("Assigned '{}' to '{}'", act.trim(), updated.name);
        }

        BranchCommands::RemoveAct { branch, act } => {
            let branch = service.require(&branch)?;
            let updated = service.remove_act(branch.id, &act)?;
            println!("Removed '{}' from '{}'", act.trim(), updated.name);
        }

        BranchCommands::Archive { branch, force } => {
            let branch = service.require(&branch)?;

            if !force {
                println!("About to archive branch: {}", branch.name);
                println!("Use --force to confirm");
                return Ok(());
            }

            let archived = service.archive(branch.id)?;
            println!("Archived branch: {}", archived.name);
        }
    }

    Ok(())
}
