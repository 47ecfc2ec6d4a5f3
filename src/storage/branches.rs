//! Branch repository for JSON storage
//!
//! Manages loading and saving branches to branches.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ComplianceError;
use crate::models::{Branch, BranchId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable branch data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BranchData {
    branches: Vec<Branch>,
}

/// Repository for branch persistence
pub struct BranchRepository {
    path: PathBuf,
    data: RwLock<HashMap<BranchId, Branch>>,
}

impl BranchRepository {
    /// Create a new branch repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load branches from disk
    pub fn load(&self) -> Result<(), ComplianceError> {
        let file_data: BranchData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            ComplianceError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for branch in file_data.branches {
            data.insert(branch.id, branch);
        }

        Ok(())
    }

    /// Save branches to disk
    pub fn save(&self) -> Result<(), ComplianceError> {
        let data = self.data.read().map_err(|e| {
            ComplianceError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut branches: Vec<_> = data.values().cloned().collect();
        branches.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        write_json_atomic(&self.path, &BranchData { branches })
    }

    /// Get a branch by ID
    pub fn get(&self, id: BranchId) -> Result<Option<Branch>, ComplianceError> {
        let data = self.data.read().map_err(|e| {
            ComplianceError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all branches, sorted by name
    pub fn get_all(&self) -> Result<Vec<Branch>, ComplianceError> {
        let data = self.data.read().map_err(|e| {
            ComplianceError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut branches: Vec<_> = data.values().cloned().collect();
        branches.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(branches)
    }

    /// Get a branch by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Branch>, ComplianceError> {
        let data = self.data.read().map_err(|e| {
            ComplianceError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let name = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|b| b.name.to_lowercase() == name)
            .cloned())
    }

    /// Find a branch by ID prefix or display ID
    pub fn find_by_id(&self, identifier: &str) -> Result<Option<Branch>, ComplianceError> {
        let data = self.data.read().map_err(|e| {
            ComplianceError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.values().find(|b| b.id.matches(identifier)).cloned())
    }

    /// Insert or update a branch
    pub fn upsert(&self, branch: Branch) -> Result<(), ComplianceError> {
        let mut data = self.data.write().map_err(|e| {
            ComplianceError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(branch.id, branch);
        Ok(())
    }

    /// Count branches
    pub fn count(&self) -> Result<usize, ComplianceError> {
        let data = self.data.read().map_err(|e| {
            ComplianceError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}
