//! YAML export
//!
//! Same content as the JSON export, for people who read their backups.

use std::io::Write;

use crate::error::{ComplianceError, ComplianceResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full database to YAML
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> ComplianceResult<()> {
    let export = FullExport::from_storage(storage)?;
    let io_err = |e: std::io::Error| ComplianceError::Export(e.to_string());

    writeln!(writer, "# compliance-cli export").map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(io_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| ComplianceError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a YAML export and check it
pub fn import_from_yaml(yaml_str: &str) -> ComplianceResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| ComplianceError::Import(e.to_string()))?;

    export.validate().map_err(ComplianceError::Import)?;

    Ok(export)
}
