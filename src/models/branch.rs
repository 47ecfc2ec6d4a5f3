//! Branch model
//!
//! An organizational location belonging to a company, configured with an
//! audit frequency and the regulatory acts assigned to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::frequency::AuditFrequency;
use super::ids::BranchId;

/// A company branch subject to periodic compliance audits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    /// Unique identifier
    pub id: BranchId,

    /// Branch name (e.g., "Pune Plant")
    pub name: String,

    /// Owning company
    #[serde(default)]
    pub company: String,

    /// Audit frequency label as stored ("Monthly", "Half-Yearly", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_frequency: Option<String>,

    /// Names of the acts assigned to this branch
    #[serde(default)]
    pub acts: Vec<String>,

    /// Whether this branch is archived (soft-deleted)
    #[serde(default)]
    pub archived: bool,

    /// When the branch was created
    pub created_at: DateTime<Utc>,

    /// When the branch was last modified
    pub updated_at: DateTime<Utc>,
}

impl Branch {
    /// Create a new branch
    pub fn new(
        name: impl Into<String>,
        company: impl Into<String>,
        frequency: AuditFrequency,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BranchId::new(),
            name: name.into(),
            company: company.into(),
            audit_frequency: Some(frequency.label().to_string()),
            acts: Vec::new(),
            archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Resolve the stored frequency label
    ///
    /// `None` means the branch has no usable frequency and no period can be
    /// computed for it.
    pub fn frequency(&self) -> Option<AuditFrequency> {
        AuditFrequency::resolve(self.audit_frequency.as_deref())
    }

    /// Change the audit frequency
    pub fn set_frequency(&mut self, frequency: AuditFrequency) {
        self.audit_frequency = Some(frequency.label().to_string());
        self.updated_at = Utc::now();
    }

    /// Assign an act; returns false if it was already assigned
    pub fn assign_act(&mut self, act: &str) -> bool {
        let act = act.trim();
        if self.has_act(act) {
            return false;
        }
        self.acts.push(act.to_string());
        self.updated_at = Utc::now();
        true
    }

    /// Remove an act; returns false if it was not assigned
    pub fn remove_act(&mut self, act: &str) -> bool {
        let before = self.acts.len();
        self.acts.retain(|a| !a.eq_ignore_ascii_case(act.trim()));
        let removed = self.acts.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Check whether an act is assigned (case-insensitive)
    pub fn has_act(&self, act: &str) -> bool {
        self.acts.iter().any(|a| a.eq_ignore_ascii_case(act.trim()))
    }

    /// Archive the branch
    pub fn archive(&mut self) {
        self.archived = true;
        self.updated_at = Utc::now();
    }

    /// Validate the branch
    pub fn validate(&self) -> Result<(), BranchValidationError> {
        if self.name.trim().is_empty() {
            return Err(BranchValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(BranchValidationError::NameTooLong(self.name.len()));
        }

        if let Some(label) = &self.audit_frequency {
            if AuditFrequency::parse(label).is_none() {
                return Err(BranchValidationError::UnknownFrequency(label.clone()));
            }
        }

        if self.acts.iter().any(|a| a.trim().is_empty()) {
            return Err(BranchValidationError::EmptyAct);
        }

        Ok(())
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for branches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchValidationError {
    EmptyName,
    NameTooLong(usize),
    UnknownFrequency(String),
    EmptyAct,
}

impl fmt::Display for BranchValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Branch name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Branch name too long ({} chars, max 100)", len)
            }
            Self::UnknownFrequency(label) => write!(
                f,
                "Unknown audit frequency '{}' (expected Monthly, Quarterly, Half-Yearly or Yearly)",
                label
            ),
            Self::EmptyAct => write!(f, "Act name cannot be empty"),
        }
    }
}

impl std::error::Error for BranchValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_branch() {
        let branch = Branch::new("Pune Plant", "Acme Ltd", AuditFrequency::Quarterly);
        assert_eq!(branch.audit_frequency.as_deref(), Some("Quarterly"));
        assert_eq!(branch.frequency(), Some(AuditFrequency::Quarterly));
        assert!(branch.acts.is_empty());
        assert!(branch.validate().is_ok());
    }

    #[test]
    fn test_unresolved_frequency() {
        let mut branch = Branch::new("Depot", "Acme Ltd", AuditFrequency::Monthly);
        branch.audit_frequency = None;
        assert_eq!(branch.frequency(), None);
        assert!(branch.validate().is_ok());

        branch.audit_frequency = Some("Fortnightly".into());
        assert_eq!(branch.frequency(), None);
        assert!(matches!(
            branch.validate(),
            Err(BranchValidationError::UnknownFrequency(_))
        ));
    }

    #[test]
    fn test_assign_and_remove_acts() {
        let mut branch = Branch::new("Depot", "Acme Ltd", AuditFrequency::Monthly);
        assert!(branch.assign_act("Factories Act"));
        assert!(!branch.assign_act("factories act"));
        assert_eq!(branch.acts.len(), 1);

        assert!(branch.remove_act("FACTORIES ACT"));
        assert!(!branch.remove_act("Factories Act"));
        assert!(branch.acts.is_empty());
    }

    #[test]
    fn test_reads_document_store_shape() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Head Office",
            "auditFrequency": "Half-Yearly",
            "createdAt": "2023-01-01T00:00:00Z",
            "updatedAt": "2023-01-01T00:00:00Z"
        }"#;
        let branch: Branch = serde_json::from_str(json).unwrap();
        assert_eq!(branch.frequency(), Some(AuditFrequency::HalfYearly));
        assert!(branch.acts.is_empty());
        assert!(!branch.archived);
    }
}
