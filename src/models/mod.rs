//! Core data models for compliance-cli
//!
//! This module contains the data structures of the compliance domain:
//! branches, audit frequencies, periods and submissions.

pub mod branch;
pub mod frequency;
pub mod ids;
pub mod period;
pub mod selection;
pub mod submission;

pub use branch::{Branch, BranchValidationError};
pub use frequency::AuditFrequency;
pub use ids::{BranchId, SubmissionId};
pub use period::{Period, PeriodParseError};
pub use selection::PeriodSelection;
pub use submission::{ComplianceResponse, ResponseStatus, SubmissionRecord};
