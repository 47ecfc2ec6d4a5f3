//! Audit logging system for compliance-cli
//!
//! Records all create, update and delete operations with before/after values
//! in an append-only, line-delimited JSON log. This is the application's
//! structured log: branch changes and every accepted submission end up here.
//!
//! # Example
//!
//! ```rust,ignore
//! use compliance::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! let entry = AuditEntry::create(
//!     EntityType::Branch,
//!     branch.id.to_string(),
//!     Some(branch.name.clone()),
//!     &branch,
//! );
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
