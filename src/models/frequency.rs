//! Audit frequency configured on a branch

use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a branch must be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AuditFrequency {
    /// One period per calendar month ("2025-01")
    #[default]
    Monthly,
    /// One period per calendar quarter ("2025-Q1")
    Quarterly,
    /// January-June and July-December ("2025-H1")
    HalfYearly,
    /// One period per calendar year ("2025")
    Yearly,
}

impl AuditFrequency {
    /// All frequencies in display order
    pub const ALL: [AuditFrequency; 4] = [
        AuditFrequency::Monthly,
        AuditFrequency::Quarterly,
        AuditFrequency::HalfYearly,
        AuditFrequency::Yearly,
    ];

    /// Parse a stored frequency label
    ///
    /// Branch documents carry free-form labels such as "Monthly" or
    /// "Half-Yearly". Anything unrecognised resolves to `None`, which callers
    /// treat as "no period can be resolved" rather than as an error.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "monthly" | "month" => Some(Self::Monthly),
            "quarterly" | "quarter" => Some(Self::Quarterly),
            "halfyearly" | "halfyear" | "semiannual" | "semiannually" => Some(Self::HalfYearly),
            "yearly" | "year" | "annual" | "annually" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// Resolve an optional stored label
    pub fn resolve(label: Option<&str>) -> Option<Self> {
        label.and_then(Self::parse)
    }

    /// Label as stored on branch documents
    pub fn label(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::HalfYearly => "Half-Yearly",
            Self::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for AuditFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
