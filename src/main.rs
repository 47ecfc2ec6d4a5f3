use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use compliance::cli::{
    handle_branch_command, handle_export_command, handle_period_command,
    handle_submission_command, handle_submit_command, BranchCommands, ExportCommands,
    PeriodCommands, SubmissionCommands, SubmitArgs,
};
use compliance::config::{paths::CompliancePaths, settings::Settings};
use compliance::storage::Storage;

#[derive(Parser)]
#[command(
    name = "compliance",
    version,
    about = "Track audit periods and compliance submissions for company branches",
    long_about = "compliance-cli tracks which audit period each branch is in, which \
                  periods may still be submitted, and records one combined \
                  compliance submission per branch and period."
)]
struct Cli {
    /// Reference date for period calculations (YYYY-MM-DD)
    #[arg(long, global = true, env = "COMPLIANCE_TODAY")]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// Branch management commands
    #[command(subcommand)]
    Branch(BranchCommands),

    /// Audit period commands
    #[command(subcommand)]
    Period(PeriodCommands),

    /// Record a combined submission for a branch
    Submit(SubmitArgs),

    /// Submission history commands
    #[command(subcommand)]
    Submission(SubmissionCommands),

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent audit log entries
    AuditLog {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let paths = CompliancePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            if !compliance::storage::init::needs_initialization(&paths) {
                println!("Already initialized at: {}", paths.base_dir().display());
                return Ok(());
            }
            println!("Initializing compliance-cli at: {}", paths.base_dir().display());
            compliance::storage::init::initialize_storage(&paths, &settings)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'compliance branch add <NAME> --frequency Quarterly' to add a branch.");
        }
        Some(Commands::Config) => {
            println!("compliance-cli Configuration");
            println!("============================");
            println!("Config directory: {}", paths.config_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Default frequency: {}", settings.default_frequency);
            println!("  Lookback years:    {}", settings.lookback_years);
            println!("  Date format:       {}", settings.date_format);
            println!(
                "  Auditor name:      {}",
                settings.auditor_name.as_deref().unwrap_or("(not set)")
            );
            println!("  Today:             {}", today);
        }
        Some(Commands::Branch(cmd)) => {
            handle_branch_command(&storage, &settings, today, cmd)?;
        }
        Some(Commands::Period(cmd)) => {
            handle_period_command(&storage, &settings, today, cmd)?;
        }
        Some(Commands::Submit(args)) => {
            handle_submit_command(&storage, &settings, today, args)?;
        }
        Some(Commands::Submission(cmd)) => {
            handle_submission_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, cmd)?;
        }
        Some(Commands::AuditLog { limit }) => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit log entries.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => {
            println!("compliance-cli - audit period and submission tracking");
            println!();
            println!("Run 'compliance --help' for usage information.");
        }
    }

    Ok(())
}
