//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Handlers that touch
//! periods take the reference date from the caller.

pub mod args;
pub mod branch;
pub mod export;
pub mod period;
pub mod submission;

pub use args::PeriodArgs;
pub use branch::{handle_branch_command, BranchCommands};
pub use export::{handle_export_command, ExportCommands};
pub use period::{handle_period_command, PeriodCommands};
pub use submission::{
    handle_submission_command, handle_submit_command, SubmissionCommands, SubmitArgs,
};
