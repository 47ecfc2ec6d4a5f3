//! CLI commands for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::{ComplianceError, ComplianceResult};
use crate::export::{csv, json, yaml};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export submissions to CSV, one row per response
    Csv {
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export branches and submissions to JSON
    Json {
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print output
        #[arg(long)]
        pretty: bool,
    },
    /// Export branches and submissions to YAML
    Yaml {
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> ComplianceResult<()> {
    match cmd {
        ExportCommands::Csv { output } => {
            let mut writer = open_output(output.as_ref())?;
            csv::export_submissions_csv(storage, &mut writer)?;
            finish(writer, output.as_ref(), "Submissions")
        }
        ExportCommands::Json { output, pretty } => {
            let mut writer = open_output(output.as_ref())?;
            json::export_full_json(storage, &mut writer, pretty)?;
            finish(writer, output.as_ref(), "Full database")
        }
        ExportCommands::Yaml { output } => {
            let mut writer = open_output(output.as_ref())?;
            yaml::export_full_yaml(storage, &mut writer)?;
            finish(writer, output.as_ref(), "Full database")
        }
    }
}

fn open_output(output: Option<&PathBuf>) -> ComplianceResult<BufWriter<Box<dyn Write>>> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path).map_err(|e| {
            ComplianceError::Export(format!(
                "Failed to create file {}: {}",
                path.display(),
                e
            ))
        })?),
        None => Box::new(io::stdout()),
    };
    Ok(BufWriter::new(sink))
}

fn finish(
    mut writer: BufWriter<Box<dyn Write>>,
    output: Option<&PathBuf>,
    what: &str,
) -> ComplianceResult<()> {
    writer
        .flush()
        .map_err(|e| ComplianceError::Export(e.to_string()))?;

    if let Some(path) = output {
        println!("{} exported to: {}", what, path.display());
    }
    Ok(())
}
