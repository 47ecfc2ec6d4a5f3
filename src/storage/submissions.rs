//! Submission repository for JSON storage
//!
//! Manages loading and saving submissions to submissions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ComplianceError;
use crate::models::{BranchId, SubmissionId, SubmissionRecord};

use super::file_io::{read_json, write_json_atomic};

/// Serializable submission data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct SubmissionData {
    submissions: Vec<SubmissionRecord>,
}

/// Repository for submission persistence
pub struct SubmissionRepository {
    path: PathBuf,
    data: RwLock<HashMap<SubmissionId, SubmissionRecord>>,
    /// Index: branch_id -> submission ids
    by_branch: RwLock<HashMap<BranchId, Vec<SubmissionId>>>,
}

impl SubmissionRepository {
    /// Create a new submission repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_branch: RwLock::new(HashMap::new()),
        }
    }

    /// Load submissions from disk
    pub fn load(&self) -> Result<(), ComplianceError> {
        let file_data: SubmissionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            ComplianceError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_branch = self.by_branch.write().map_err(|e| {
            ComplianceError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_branch.clear();

        for submission in file_data.submissions {
            by_branch
                .entry(submission.branch_id)
                .or_default()
                .push(submission.id);
            data.insert(submission.id, submission);
        }

        Ok(())
    }

    /// Save submissions to disk
    pub fn save(&self) -> Result<(), ComplianceError> {
        let data = self.data.read().map_err(|e| {
            ComplianceError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut submissions: Vec<_> = data.values().cloned().collect();
        submissions.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));

        write_json_atomic(&self.path, &SubmissionData { submissions })
    }

    /// Get a submission by ID
    pub fn get(&self, id: SubmissionId) -> Result<Option<SubmissionRecord>, ComplianceError> {
        let data = self.data.read().map_err(|e| {
            ComplianceError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all submissions, oldest first
    pub fn get_all(&self) -> Result<Vec<SubmissionRecord>, ComplianceError> {
        let data = self.data.read().map_err(|e| {
            ComplianceError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut submissions: Vec<_> = data.values().cloned().collect();
        submissions.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
        Ok(submissions)
    }

    /// Snapshot of every submission recorded for one branch, oldest first
    pub fn for_branch(
        &self,
        branch_id: BranchId,
    ) -> Result<Vec<SubmissionRecord>, ComplianceError> {
        let data = self.data.read().map_err(|e| {
            ComplianceError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_branch = self.by_branch.read().map_err(|e| {
            ComplianceError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut submissions: Vec<_> = by_branch
            .get(&branch_id)
            .map(|ids| ids.iter().filter_map(|id| data.get(id).cloned()).collect())
            .unwrap_or_default();

        submissions.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
        Ok(submissions)
    }

    /// Insert a submission; submissions are never mutated once stored
    pub fn insert(&self, submission: SubmissionRecord) -> Result<(), ComplianceError> {
        let mut data = self.data.write().map_err(|e| {
            ComplianceError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_branch = self.by_branch.write().map_err(|e| {
            ComplianceError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if data.contains_key(&submission.id) {
            return Err(ComplianceError::Duplicate {
                entity_type: "Submission",
                identifier: submission.id.to_string(),
            });
        }

        by_branch
            .entry(submission.branch_id)
            .or_default()
            .push(submission.id);
        data.insert(submission.id, submission);
        Ok(())
    }

    /// Count submissions
    pub fn count(&self) -> Result<usize, ComplianceError> {
        let data = self.data.read().map_err(|e| {
            ComplianceError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}
