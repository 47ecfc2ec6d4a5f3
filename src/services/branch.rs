//! Branch service
//!
//! Provides business logic for branch management: creation, lookup,
//! frequency changes and act assignment.

use crate::audit::EntityType;
use crate::config::settings::Settings;
use crate::error::{ComplianceError, ComplianceResult};
use crate::models::{AuditFrequency, Branch, BranchId};
use crate::storage::Storage;

/// Service for branch management
pub struct BranchService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> BranchService<'a> {
    /// Create a new branch service
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Create a new branch
    ///
    /// Without an explicit frequency the configured default is used.
    pub fn create(
        &self,
        name: &str,
        company: &str,
        frequency: Option<&str>,
    ) -> ComplianceResult<Branch> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ComplianceError::Validation(
                "Branch name cannot be empty".into(),
            ));
        }

        if self.storage.branches.get_by_name(name)?.is_some() {
            return Err(ComplianceError::Duplicate {
                entity_type: "Branch",
                identifier: name.to_string(),
            });
        }

        let frequency = match frequency {
            Some(label) => parse_frequency(label)?,
            None => self.settings.default_frequency,
        };

        let branch = Branch::new(name, company.trim(), frequency);
        branch
            .validate()
            .map_err(|e| ComplianceError::Validation(e.to_string()))?;

        self.storage.branches.upsert(branch.clone())?;
        self.storage.branches.save()?;

        self.storage.log_create(
            EntityType::Branch,
            branch.id.to_string(),
            Some(branch.name.clone()),
            &branch,
        )?;

        Ok(branch)
    }

    /// Find a branch by name or ID
    pub fn find(&self, identifier: &str) -> ComplianceResult<Option<Branch>> {
        if let Some(branch) = self.storage.branches.get_by_name(identifier)? {
            return Ok(Some(branch));
        }

        self.storage.branches.find_by_id(identifier)
    }

    /// Find a branch or fail with a not-found error
    pub fn require(&self, identifier: &str) -> ComplianceResult<Branch> {
        self.find(identifier)?
            .ok_or_else(|| ComplianceError::branch_not_found(identifier))
    }

    /// List branches
    pub fn list(&self, include_archived: bool) -> ComplianceResult<Vec<Branch>> {
        let branches = self.storage.branches.get_all()?;
        Ok(branches
            .into_iter()
            .filter(|b| include_archived || !b.archived)
            .collect())
    }

    /// Change a branch's audit frequency
    pub fn set_frequency(&self, id: BranchId, label: &str) -> ComplianceResult<Branch> {
        let frequency = parse_frequency(label)?;
        self.update(id, |branch| {
            branch.set_frequency(frequency);
            Ok(())
        })
    }

    /// Assign an act to a branch
    pub fn assign_act(&self, id: BranchId, act: &str) -> ComplianceResult<Branch> {
        let act = act.trim();
        if act.is_empty() {
            return Err(ComplianceError::Validation("Act name cannot be empty".into()));
        }

        self.update(id, |branch| {
            if branch.assign_act(act) {
                Ok(())
            } else {
                Err(ComplianceError::Duplicate {
                    entity_type: "Act",
                    identifier: act.to_string(),
                })
            }
        })
    }

    /// Remove an act from a branch
    pub fn remove_act(&self, id: BranchId, act: &str) -> ComplianceResult<Branch> {
        self.update(id, |branch| {
            if branch.remove_act(act) {
                Ok(())
            } else {
                Err(ComplianceError::NotFound {
                    entity_type: "Act",
                    identifier: act.trim().to_string(),
                })
            }
        })
    }

    /// Archive a branch (soft delete); its submissions are kept
    pub fn archive(&self, id: BranchId) -> ComplianceResult<Branch> {
        let mut branch = self
            .storage
            .branches
            .get(id)?
            .ok_or_else(|| ComplianceError::branch_not_found(id.to_string()))?;

        if branch.archived {
            return Err(ComplianceError::Validation(format!(
                "Branch '{}' is already archived",
                branch.name
            )));
        }

        branch.archive();
        self.storage.branches.upsert(branch.clone())?;
        self.storage.branches.save()?;

        self.storage.log_delete(
            EntityType::Branch,
            branch.id.to_string(),
            Some(branch.name.clone()),
            &branch,
        )?;

        Ok(branch)
    }

    /// Apply a change, validate, save and audit-log it
    fn update<F>(&self, id: BranchId, change: F) -> ComplianceResult<Branch>
    where
        F: FnOnce(&mut Branch) -> ComplianceResult<()>,
    {
        let before = self
            .storage
            .branches
            .get(id)?
            .ok_or_else(|| ComplianceError::branch_not_found(id.to_string()))?;

        let mut branch = before.clone();
        change(&mut branch)?;
        branch
            .validate()
            .map_err(|e| ComplianceError::Validation(e.to_string()))?;

        self.storage.branches.upsert(branch.clone())?;
        self.storage.branches.save()?;

        self.storage.log_update(
            EntityType::Branch,
            branch.id.to_string(),
            Some(branch.name.clone()),
            &before,
            &branch,
        )?;

        Ok(branch)
    }
}

fn parse_frequency(label: &str) -> ComplianceResult<AuditFrequency> {
    AuditFrequency::parse(label).ok_or_else(|| {
        ComplianceError::Validation(format!(
            "Unknown audit frequency '{}' (expected Monthly, Quarterly, Half-Yearly or Yearly)",
            label
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::CompliancePaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CompliancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_uses_default_frequency() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        settings.default_frequency = AuditFrequency::Quarterly;
        let service = BranchService::new(&storage, &settings);

        let branch = service.create("Pune Plant", "Acme", None).unwrap();
        assert_eq!(branch.frequency(), Some(AuditFrequency::Quarterly));

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
    }

    #[test]
    fn test_create_rejects_duplicates_and_bad_frequency() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = BranchService::new(&storage, &settings);

        service.create("Depot", "Acme", Some("Yearly")).unwrap();
        assert!(matches!(
            service.create("depot", "Acme", None),
            Err(ComplianceError::Duplicate { .. })
        ));
        assert!(service
            .create("Warehouse", "Acme", Some("Fortnightly"))
            .unwrap_err()
            .is_validation());
        assert!(service.create("   ", "Acme", None).unwrap_err().is_validation());
    }

    #[test]
    fn test_find_by_name_or_id() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = BranchService::new(&storage, &settings);

        let branch = service.create("Head Office", "Acme", None).unwrap();
        assert_eq!(service.require("head office").unwrap().id, branch.id);
        assert_eq!(service.require(&branch.id.to_string()).unwrap().id, branch.id);
        assert!(service.require("Nowhere").unwrap_err().is_not_found());
    }

    #[test]
    fn test_set_frequency_logs_diff() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = BranchService::new(&storage, &settings);

        let branch = service.create("Depot", "Acme", Some("Monthly")).unwrap();
        let updated = service.set_frequency(branch.id, "half-yearly").unwrap();
        assert_eq!(updated.frequency(), Some(AuditFrequency::HalfYearly));

        let entries = storage.audit().read_all().unwrap();
        let last = entries.last().unwrap();
        assert_eq!(last.operation, Operation::Update);
        assert!(last
            .diff_summary
            .as_deref()
            .unwrap()
            .contains("\"Monthly\" -> \"Half-Yearly\""));
    }

    #[test]
    fn test_act_assignment() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = BranchService::new(&storage, &settings);

        let branch = service.create("Depot", "Acme", None).unwrap();
        let branch = service.assign_act(branch.id, "Factories Act").unwrap();
        assert_eq!(branch.acts, vec!["Factories Act".to_string()]);

        assert!(matches!(
            service.assign_act(branch.id, "factories act"),
            Err(ComplianceError::Duplicate { .. })
        ));

        let branch = service.remove_act(branch.id, "Factories Act").unwrap();
        assert!(branch.acts.is_empty());
        assert!(service.remove_act(branch.id, "Factories Act").unwrap_err().is_not_found());
    }

    #[test]
    fn test_archive_hides_from_list() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = BranchService::new(&storage, &settings);

        let branch = service.create("Depot", "Acme", None).unwrap();
        service.create("Head Office", "Acme", None).unwrap();
        service.archive(branch.id).unwrap();

        assert_eq!(service.list(false).unwrap().len(), 1);
        assert_eq!(service.list(true).unwrap().len(), 2);
        assert!(service.archive(branch.id).unwrap_err().is_validation());
    }
}
