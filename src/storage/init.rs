//! Storage initialization
//!
//! Handles first-run setup: directories, settings file and empty data files.

use crate::config::paths::CompliancePaths;
use crate::config::settings::Settings;
use crate::error::ComplianceError;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing data files are left untouched.
pub fn initialize_storage(
    paths: &CompliancePaths,
    settings: &Settings,
) -> Result<(), ComplianceError> {
    paths.ensure_directories()?;

    if !paths.branches_file().exists() {
        write_json_atomic(paths.branches_file(), &serde_json::json!({ "branches": [] }))?;
    }

    if !paths.submissions_file().exists() {
        write_json_atomic(
            paths.submissions_file(),
            &serde_json::json!({ "submissions": [] }),
        )?;
    }

    if !paths.settings_file().exists() {
        settings.save(paths)?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &CompliancePaths) -> bool {
    !paths.is_initialized()
}
