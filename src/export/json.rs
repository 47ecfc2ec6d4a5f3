//! JSON export
//!
//! Exports branches and submissions to JSON with schema versioning.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ComplianceError, ComplianceResult};
use crate::models::{Branch, SubmissionRecord};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub branches: Vec<Branch>,

    pub submissions: Vec<SubmissionRecord>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub branch_count: usize,
    pub archived_branch_count: usize,
    pub submission_count: usize,
    /// Earliest well-formed submission period
    pub earliest_period: Option<String>,
    /// Latest well-formed submission period
    pub latest_period: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> ComplianceResult<Self> {
        let branches = storage.branches.get_all()?;
        let submissions = storage.submissions.get_all()?;

        let periods: Vec<_> = submissions.iter().filter_map(|s| s.parsed_period()).collect();

        let metadata = ExportMetadata {
            branch_count: branches.len(),
            archived_branch_count: branches.iter().filter(|b| b.archived).count(),
            submission_count: submissions.len(),
            earliest_period: periods.iter().min().map(|p| p.to_string()),
            latest_period: periods.iter().max().map(|p| p.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            branches,
            submissions,
            metadata,
        })
    }

    /// Validate the export structure
    ///
    /// Every submission must reference an exported branch, and no branch may
    /// hold two combined submissions for the same period key.
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let branch_ids: HashSet<_> = self.branches.iter().map(|b| b.id).collect();
        let mut combined = HashSet::new();

        for submission in &self.submissions {
            if !branch_ids.contains(&submission.branch_id) {
                return Err(format!(
                    "Submission {} references unknown branch {}",
                    submission.id, submission.branch_id
                ));
            }

            if let (true, Some(period)) = (submission.is_combined_submission, &submission.period) {
                if !combined.insert((submission.branch_id, period.as_str())) {
                    return Err(format!(
                        "Branch {} has more than one combined submission for {}",
                        submission.branch_id, period
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Export the full database to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> ComplianceResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| ComplianceError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a JSON export and check it
pub fn import_from_json(json_str: &str) -> ComplianceResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| ComplianceError::Import(e.to_string()))?;

    export.validate().map_err(ComplianceError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CompliancePaths;
    use crate::models::{AuditFrequency, BranchId, Period};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CompliancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_full_export_metadata() {
        let (_temp_dir, storage) = create_test_storage();

        let branch = Branch::new("Depot", "Acme", AuditFrequency::Monthly);
        storage.branches.upsert(branch.clone()).unwrap();
        for month in [3, 11, 7] {
            storage
                .submissions
                .insert(SubmissionRecord::combined(branch.id, Period::monthly(2022, month), "a"))
                .unwrap();
        }

        let export = FullExport::from_storage(&storage).unwrap();
        assert_eq!(export.metadata.branch_count, 1);
        assert_eq!(export.metadata.submission_count, 3);
        assert_eq!(export.metadata.earliest_period.as_deref(), Some("2022-03"));
        assert_eq!(export.metadata.latest_period.as_deref(), Some("2022-11"));
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let (_temp_dir, storage) = create_test_storage();

        let branch = Branch::new("Depot", "Acme", AuditFrequency::Yearly);
        storage.branches.upsert(branch.clone()).unwrap();
        storage
            .submissions
            .insert(SubmissionRecord::combined(branch.id, Period::yearly(2023), "a"))
            .unwrap();

        let mut output = Vec::new();
        export_full_json(&storage, &mut output, true).unwrap();

        let imported = import_from_json(&String::from_utf8(output).unwrap()).unwrap();
        assert_eq!(imported.branches[0].name, "Depot");
        assert_eq!(imported.submissions[0].period.as_deref(), Some("2023"));
    }

    #[test]
    fn test_validate_rejects_orphans_and_duplicates() {
        let (_temp_dir, storage) = create_test_storage();
        let branch = Branch::new("Depot", "Acme", AuditFrequency::Yearly);
        storage.branches.upsert(branch.clone()).unwrap();

        let mut export = FullExport::from_storage(&storage).unwrap();
        export
            .submissions
            .push(SubmissionRecord::combined(BranchId::new(), Period::yearly(2023), "a"));
        assert!(export.validate().unwrap_err().contains("unknown branch"));

        export.submissions.clear();
        for _ in 0..2 {
            export
                .submissions
                .push(SubmissionRecord::combined(branch.id, Period::yearly(2023), "a"));
        }
        assert!(export.validate().unwrap_err().contains("more than one"));
    }
}
