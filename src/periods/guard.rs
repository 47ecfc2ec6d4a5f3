//! Submission deduplication
//!
//! A branch gets at most one combined submission per period. The guard is a
//! predicate over records already fetched for one branch; it does no
//! filtering of its own.
//!
//! Period keys are compared verbatim: no trimming, no case folding. A record
//! without a period never blocks, and an unresolved candidate never matches.

use chrono::{DateTime, Utc};

use crate::models::{SubmissionId, SubmissionRecord};

/// Outcome of checking a candidate period against existing submissions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionDecision {
    /// No combined submission exists for the period
    Allowed,
    /// A combined submission already covers the period
    AlreadySubmitted {
        period: String,
        submission_id: SubmissionId,
        submitted_at: Option<DateTime<Utc>>,
    },
}

impl SubmissionDecision {
    /// Check whether the submission may proceed
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Human-readable reason
    pub fn reason(&self) -> String {
        match self {
            Self::Allowed => "No combined submission exists for this period".to_string(),
            Self::AlreadySubmitted {
                period,
                submitted_at: Some(at),
                ..
            } => format!(
                "Period {} was already submitted on {}",
                period,
                at.format("%Y-%m-%d %H:%M UTC")
            ),
            Self::AlreadySubmitted { period, .. } => {
                format!("Period {} was already submitted", period)
            }
        }
    }
}

/// Find the combined submission that blocks `candidate`, if any
pub fn check_submission(
    existing: &[SubmissionRecord],
    candidate: Option<&str>,
) -> SubmissionDecision {
    let Some(candidate) = candidate else {
        return SubmissionDecision::Allowed;
    };

    existing
        .iter()
        .find(|record| {
            record.is_combined_submission && record.period.as_deref() == Some(candidate)
        })
        .map(|record| SubmissionDecision::AlreadySubmitted {
            period: candidate.to_string(),
            submission_id: record.id,
            submitted_at: record.timestamp,
        })
        .unwrap_or(SubmissionDecision::Allowed)
}

/// `false` iff a combined submission with exactly this period exists
pub fn can_submit(existing: &[SubmissionRecord], candidate: Option<&str>) -> bool {
    check_submission(existing, candidate).is_allowed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BranchId, Period};

    fn record(period: Option<&str>, combined: bool) -> SubmissionRecord {
        let mut record =
            SubmissionRecord::combined(BranchId::new(), Period::yearly(2000), "tester");
        record.period = period.map(str::to_string);
        record.is_combined_submission = combined;
        record
    }

    #[test]
    fn test_blocks_same_period() {
        let existing = vec![record(Some("2023-Q3"), true)];
        assert!(!can_submit(&existing, Some("2023-Q3")));
    }

    #[test]
    fn test_allows_other_period() {
        let existing = vec![record(Some("2023-Q2"), true)];
        assert!(can_submit(&existing, Some("2023-Q3")));
    }

    #[test]
    fn test_allows_when_empty() {
        assert!(can_submit(&[], Some("2023-Q3")));
    }

    #[test]
    fn test_non_combined_submissions_never_block() {
        let existing = vec![record(Some("2023-Q3"), false)];
        assert!(can_submit(&existing, Some("2023-Q3")));
    }

    #[test]
    fn test_missing_period_never_blocks() {
        let existing = vec![record(None, true)];
        assert!(can_submit(&existing, Some("2023-Q3")));
    }

    #[test]
    fn test_unresolved_candidate_is_permitted() {
        let existing = vec![record(Some("2023-Q3"), true), record(None, true)];
        assert!(can_submit(&existing, None));
    }

    #[test]
    fn test_comparison_is_exact() {
        let existing = vec![record(Some("2023-q3"), true), record(Some(" 2023-Q3"), true)];
        assert!(can_submit(&existing, Some("2023-Q3")));
    }

    #[test]
    fn test_decision_reports_blocking_record() {
        let blocking = record(Some("2024-H1"), true);
        let id = blocking.id;
        let existing = vec![record(Some("2023-H2"), true), blocking];

        match check_submission(&existing, Some("2024-H1")) {
            SubmissionDecision::AlreadySubmitted {
                period,
                submission_id,
                submitted_at,
            } => {
                assert_eq!(period, "2024-H1");
                assert_eq!(submission_id, id);
                assert!(submitted_at.is_some());
            }
            other => panic!("expected a blocked decision, got {:?}", other),
        }
    }

    #[test]
    fn test_reason_text() {
        assert!(SubmissionDecision::Allowed.reason().starts_with("No combined"));
        let blocked = SubmissionDecision::AlreadySubmitted {
            period: "2024".into(),
            submission_id: SubmissionId::new(),
            submitted_at: None,
        };
        assert_eq!(blocked.reason(), "Period 2024 was already submitted");
    }
}
