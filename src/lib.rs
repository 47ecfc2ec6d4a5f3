//! compliance-cli - audit period tracking for branch compliance submissions
//!
//! Branches are audited on a fixed frequency (monthly, quarterly, half-yearly
//! or yearly). This library resolves the audit period a date falls in,
//! enumerates the periods an auditor may pick, and guarantees at most one
//! combined submission per branch and period.
//!
//! # Architecture
//!
//! - `periods`: period resolution, enumeration and the submission guard
//! - `models`: branches, frequencies, periods and submissions
//! - `config`: configuration and path management
//! - `storage`: JSON file storage layer
//! - `audit`: audit logging system
//! - `services`: business logic layer
//! - `export`: CSV, JSON and YAML export
//! - `cli` / `display`: command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use chrono::NaiveDate;
//! use compliance::models::AuditFrequency;
//! use compliance::periods::current_period;
//!
//! let today = NaiveDate::from_ymd_opt(2023, 8, 15).unwrap();
//! assert_eq!(current_period(AuditFrequency::Quarterly, today).to_string(), "2023-Q3");
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod periods;
pub mod services;
pub mod storage;

pub use error::{ComplianceError, ComplianceResult};
