//! Path management for compliance-cli
//!
//! Provides XDG-compliant path resolution for configuration, data, and exports.
//!
//! ## Path Resolution Order
//!
//! 1. `COMPLIANCE_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/compliance-cli` or `~/.config/compliance-cli`
//! 3. Windows: `%APPDATA%\compliance-cli`

use std::path::PathBuf;

use crate::error::ComplianceError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "COMPLIANCE_CLI_DATA_DIR";

/// Manages all paths used by compliance-cli
#[derive(Debug, Clone)]
pub struct CompliancePaths {
    /// Base directory for all compliance-cli data
    base_dir: PathBuf,
}

impl CompliancePaths {
    /// Create a new CompliancePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, ComplianceError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create CompliancePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/compliance-cli/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config directory (same as base for simplicity)
    pub fn config_dir(&self) -> PathBuf {
        self.base_dir.clone()
    }

    /// Get the data directory (~/.config/compliance-cli/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the export directory (~/.config/compliance-cli/exports/)
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to branches.json
    pub fn branches_file(&self) -> PathBuf {
        self.data_dir().join("branches.json")
    }

    /// Get the path to submissions.json
    pub fn submissions_file(&self) -> PathBuf {
        self.data_dir().join("submissions.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), ComplianceError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ComplianceError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| ComplianceError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir()).map_err(|e| {
            ComplianceError::Io(format!("Failed to create export directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if compliance-cli has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, ComplianceError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                ComplianceError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("compliance-cli"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, ComplianceError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| ComplianceError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("compliance-cli"))
}
