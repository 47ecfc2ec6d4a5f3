//! Service layer for compliance-cli
//!
//! The service layer sits between the CLI and storage. It resolves audit
//! periods, enforces the submission rules from `periods`, and makes sure
//! every mutation is saved and audit-logged.

pub mod branch;
pub mod submission;

pub use branch::BranchService;
pub use submission::{BranchSummary, PeriodStatus, SubmissionService, SubmitRequest};
