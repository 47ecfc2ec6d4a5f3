//! Submission service
//!
//! Resolves the period a submission is for, enforces the one combined
//! submission per branch and period rule, and records accepted submissions.
//! The reference date is always passed in by the caller.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::config::settings::Settings;
use crate::error::{ComplianceError, ComplianceResult};
use crate::models::{
    AuditFrequency, Branch, ComplianceResponse, Period, PeriodSelection, ResponseStatus,
    SubmissionRecord,
};
use crate::periods::{self, SubmissionDecision};
use crate::storage::Storage;

/// A selectable period and whether it already has a combined submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodStatus {
    pub period: Period,
    pub label: String,
    pub submitted: bool,
}

/// Everything needed to record a combined submission
#[derive(Debug, Clone, Default)]
pub struct SubmitRequest {
    /// Explicit period choice; `None` means the current period
    pub selection: Option<PeriodSelection>,
    /// Who is submitting; falls back to the configured auditor name
    pub submitted_by: Option<String>,
    pub responses: Vec<ComplianceResponse>,
}

/// Compliance overview of one branch
#[derive(Debug, Clone)]
pub struct BranchSummary {
    pub frequency: Option<AuditFrequency>,
    pub current_period: Option<Period>,
    pub current_submitted: bool,
    pub total_submissions: usize,
    /// Selectable periods without a combined submission, most recent first
    pub missing_periods: Vec<Period>,
    pub compliant: usize,
    pub non_compliant: usize,
    pub not_applicable: usize,
}

/// Service for submission management
pub struct SubmissionService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> SubmissionService<'a> {
    /// Create a new submission service
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// The branch's current period, or `None` if its frequency is unresolved
    pub fn current_period(&self, branch: &Branch, today: NaiveDate) -> Option<Period> {
        branch
            .frequency()
            .map(|frequency| periods::current_period(frequency, today))
    }

    /// Selectable periods for the branch, each tagged with its submission state
    pub fn available_periods(
        &self,
        branch: &Branch,
        today: NaiveDate,
    ) -> ComplianceResult<Vec<PeriodStatus>> {
        let Some(frequency) = branch.frequency() else {
            return Ok(Vec::new());
        };

        let existing = self.storage.submissions.for_branch(branch.id)?;

        Ok(
            periods::list_periods(frequency, today, self.settings.lookback_years)
                .into_iter()
                .map(|period| PeriodStatus {
                    submitted: !periods::can_submit(&existing, Some(&period.to_string())),
                    label: periods::period_label(&period),
                    period,
                })
                .collect(),
        )
    }

    /// Resolve the period a submission is for
    ///
    /// Fails for an unresolved frequency, a selection that does not fit the
    /// frequency, and a period outside the selectable window.
    pub fn resolve_period(
        &self,
        branch: &Branch,
        selection: Option<&PeriodSelection>,
        today: NaiveDate,
    ) -> ComplianceResult<Period> {
        let frequency = branch.frequency();

        let period = match selection {
            Some(selection) => periods::format_period(frequency, selection)?,
            None => frequency.map(|f| periods::current_period(f, today)),
        };

        let period = period.ok_or_else(|| {
            ComplianceError::Validation(format!(
                "Branch '{}' has no usable audit frequency; set one before submitting",
                branch.name
            ))
        })?;

        if !periods::is_selectable(&period, today, self.settings.lookback_years) {
            return Err(ComplianceError::Validation(format!(
                "Period {} cannot be selected on {}",
                period, today
            )));
        }

        Ok(period)
    }

    /// Check a period key against the branch's stored submissions, verbatim
    pub fn check(&self, branch: &Branch, period: &str) -> ComplianceResult<SubmissionDecision> {
        let existing = self.storage.submissions.for_branch(branch.id)?;
        Ok(periods::check_submission(&existing, Some(period)))
    }

    /// Record a combined submission
    pub fn submit(
        &self,
        branch: &Branch,
        request: SubmitRequest,
        today: NaiveDate,
    ) -> ComplianceResult<SubmissionRecord> {
        if branch.archived {
            return Err(ComplianceError::Validation(format!(
                "Branch '{}' is archived",
                branch.name
            )));
        }

        let period = self.resolve_period(branch, request.selection.as_ref(), today)?;

        for response in &request.responses {
            if !branch.acts.is_empty() && !branch.has_act(&response.act) {
                return Err(ComplianceError::Validation(format!(
                    "Act '{}' is not assigned to branch '{}'",
                    response.act, branch.name
                )));
            }
        }

        let key = period.to_string();
        if let SubmissionDecision::AlreadySubmitted { .. } = self.check(branch, &key)? {
            return Err(ComplianceError::AlreadySubmitted {
                branch: branch.name.clone(),
                period: key,
            });
        }

        let submitted_by = request
            .submitted_by
            .or_else(|| self.settings.auditor_name.clone())
            .unwrap_or_default();

        let mut record = SubmissionRecord::combined(branch.id, period, submitted_by);
        record.responses = request.responses;

        self.storage.submissions.insert(record.clone())?;
        self.storage.submissions.save()?;

        self.storage.log_create(
            EntityType::Submission,
            record.id.to_string(),
            Some(format!("{} {}", branch.name, key)),
            &record,
        )?;

        Ok(record)
    }

    /// Find a submission by full or abbreviated ID
    pub fn find(&self, identifier: &str) -> ComplianceResult<SubmissionRecord> {
        self.storage
            .submissions
            .get_all()?
            .into_iter()
            .find(|s| s.id.matches(identifier))
            .ok_or_else(|| ComplianceError::submission_not_found(identifier))
    }

    /// Submissions for a branch, most recent period first
    pub fn list(&self, branch: &Branch) -> ComplianceResult<Vec<SubmissionRecord>> {
        let mut records = self.storage.submissions.for_branch(branch.id)?;
        records.sort_by(|a, b| {
            b.parsed_period()
                .cmp(&a.parsed_period())
                .then(b.timestamp.cmp(&a.timestamp))
        });
        Ok(records)
    }

    /// Compliance overview for a branch
    pub fn summary(&self, branch: &Branch, today: NaiveDate) -> ComplianceResult<BranchSummary> {
        let records = self.storage.submissions.for_branch(branch.id)?;
        let available = self.available_periods(branch, today)?;

        let current_period = self.current_period(branch, today);
        let current_submitted = available
            .first()
            .map(|status| Some(status.period) == current_period && status.submitted)
            .unwrap_or(false);

        let count = |status: ResponseStatus| -> usize {
            records.iter().map(|r| r.count_status(status)).sum()
        };

        Ok(BranchSummary {
            frequency: branch.frequency(),
            current_period,
            current_submitted,
            total_submissions: records.iter().filter(|r| r.is_combined_submission).count(),
            missing_periods: available
                .iter()
                .filter(|status| !status.submitted)
                .map(|status| status.period)
                .collect(),
            compliant: count(ResponseStatus::Compliant),
            non_compliant: count(ResponseStatus::NonCompliant),
            not_applicable: count(ResponseStatus::NotApplicable),
        })
    }
}
