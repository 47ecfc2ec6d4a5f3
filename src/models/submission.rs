//! Submission model
//!
//! A submission is one audit response document for a branch. Combined
//! submissions cover every act and question of the branch for one period and
//! are keyed by the period string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BranchId, SubmissionId};
use super::period::Period;

/// Compliance status recorded against a checklist question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseStatus {
    Compliant,
    NonCompliant,
    NotApplicable,
}

impl ResponseStatus {
    /// Parse a status from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "compliant" | "yes" | "y" | "ok" => Some(Self::Compliant),
            "non-compliant" | "noncompliant" | "non_compliant" | "no" | "n" => {
                Some(Self::NonCompliant)
            }
            "not-applicable" | "notapplicable" | "not_applicable" | "na" | "n/a" => {
                Some(Self::NotApplicable)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compliant => write!(f, "Compliant"),
            Self::NonCompliant => write!(f, "Non-Compliant"),
            Self::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// One answered checklist question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceResponse {
    /// Act the question belongs to
    pub act: String,

    /// Question text or identifier
    pub question: String,

    /// Compliance status
    pub status: ResponseStatus,

    /// Free-form auditor remarks
    #[serde(default)]
    pub remarks: String,
}

impl ComplianceResponse {
    /// Parse `ACT::QUESTION=STATUS[:REMARKS]`
    pub fn parse(s: &str) -> Result<Self, String> {
        let (target, answer) = s
            .split_once('=')
            .ok_or_else(|| format!("Expected ACT::QUESTION=STATUS[:REMARKS], got '{}'", s))?;

        let (act, question) = target
            .split_once("::")
            .ok_or_else(|| format!("Missing '::' between act and question in '{}'", target))?;

        let (status, remarks) = match answer.split_once(':') {
            Some((status, remarks)) => (status, remarks.trim()),
            None => (answer, ""),
        };

        let status = ResponseStatus::parse(status)
            .ok_or_else(|| format!("Unknown status '{}'", status.trim()))?;

        let act = act.trim();
        let question = question.trim();
        if act.is_empty() || question.is_empty() {
            return Err(format!("Act and question must not be empty in '{}'", s));
        }

        Ok(Self {
            act: act.to_string(),
            question: question.to_string(),
            status,
            remarks: remarks.to_string(),
        })
    }
}

/// A persisted submission document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    /// Unique identifier
    #[serde(default)]
    pub id: SubmissionId,

    /// Branch the submission belongs to
    pub branch_id: BranchId,

    /// Whether this document covers all acts of the branch for the period
    #[serde(default)]
    pub is_combined_submission: bool,

    /// Period key, compared verbatim by the submission guard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,

    /// When the submission was made
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Auditor or user who submitted
    #[serde(default)]
    pub submitted_by: String,

    /// Answers to the branch checklist
    #[serde(default)]
    pub responses: Vec<ComplianceResponse>,
}

impl SubmissionRecord {
    /// Create a combined submission for a period, stamped now
    pub fn combined(branch_id: BranchId, period: Period, submitted_by: impl Into<String>) -> Self {
        Self {
            id: SubmissionId::new(),
            branch_id,
            is_combined_submission: true,
            period: Some(period.to_string()),
            timestamp: Some(Utc::now()),
            submitted_by: submitted_by.into(),
            responses: Vec::new(),
        }
    }

    /// Parsed period, if the stored key is well-formed
    pub fn parsed_period(&self) -> Option<Period> {
        self.period.as_deref().and_then(|p| Period::parse(p).ok())
    }

    /// Count responses with the given status
    pub fn count_status(&self, status: ResponseStatus) -> usize {
        self.responses.iter().filter(|r| r.status == status).count()
    }
}
