//! Storage layer for compliance-cli
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation, plus the audit log every mutation is recorded in.

pub mod branches;
pub mod file_io;
pub mod init;
pub mod submissions;

pub use branches::BranchRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use submissions::SubmissionRepository;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::CompliancePaths;
use crate::error::ComplianceError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: CompliancePaths,
    audit: AuditLogger,
    pub branches: BranchRepository,
    pub submissions: SubmissionRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: CompliancePaths) -> Result<Self, ComplianceError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            branches: BranchRepository::new(paths.branches_file()),
            submissions: SubmissionRepository::new(paths.submissions_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &CompliancePaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), ComplianceError> {
        self.branches.load()?;
        self.submissions.load()?;
        Ok(())
    }

    /// Record a create operation in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), ComplianceError> {
        let entry = AuditEntry::create(entity_type, entity_id, entity_name, entity);
        self.audit.log(&entry)
    }

    /// Record an update operation, with a diff of the two states
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), ComplianceError> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        let entry = AuditEntry::update(entity_type, entity_id, entity_name, before, after, diff);
        self.audit.log(&entry)
    }

    /// Record a delete (or archive) operation
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), ComplianceError> {
        let entry = AuditEntry::delete(entity_type, entity_id, entity_name, entity);
        self.audit.log(&entry)
    }
}
