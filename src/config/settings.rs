//! User settings for compliance-cli
//!
//! Manages preferences such as the default audit frequency for new branches,
//! the period lookback window and the auditor name stamped on submissions.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::CompliancePaths;
use crate::error::ComplianceError;
use crate::models::AuditFrequency;
use crate::periods::{LOOKBACK_YEARS, MAX_LOOKBACK_YEARS};

/// User settings for compliance-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Frequency assigned to branches created without an explicit one
    #[serde(default)]
    pub default_frequency: AuditFrequency,

    /// How many years back the period picker reaches
    #[serde(default = "default_lookback_years")]
    pub lookback_years: u32,

    /// strftime format for dates in terminal output
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Name recorded on submissions when `--by` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auditor_name: Option<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_lookback_years() -> u32 {
    LOOKBACK_YEARS
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_frequency: AuditFrequency::default(),
            lookback_years: default_lookback_years(),
            date_format: default_date_format(),
            auditor_name: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &CompliancePaths) -> Result<Self, ComplianceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ComplianceError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ComplianceError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Reject values the period and display code cannot work with
    pub fn validate(&self) -> Result<(), ComplianceError> {
        if self.lookback_years > MAX_LOOKBACK_YEARS {
            return Err(ComplianceError::Config(format!(
                "lookback_years must be at most {}, got {}",
                MAX_LOOKBACK_YEARS, self.lookback_years
            )));
        }

        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ComplianceError::Config(format!(
                "Invalid date_format '{}'",
                self.date_format
            )));
        }

        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CompliancePaths) -> Result<(), ComplianceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ComplianceError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            ComplianceError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
