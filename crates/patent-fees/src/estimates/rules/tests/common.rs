use chrono::NaiveDate;

use crate::estimates::domain::{
    ApplicantType, ApplicationScenario, ApplicationType, FeeBreakdown, JurisdictionId,
};
use crate::estimates::rules::RuleRegistry;

pub(super) fn before_revision() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 31).expect("valid date")
}

pub(super) fn after_revision() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 1).expect("valid date")
}

pub(super) fn scenario(application_type: ApplicationType) -> ApplicationScenario {
    ApplicationScenario::new(application_type)
}

pub(super) fn compute(
    id: JurisdictionId,
    scenario: &ApplicationScenario,
    applicant: ApplicantType,
) -> FeeBreakdown {
    compute_on(id, scenario, applicant, after_revision())
}

pub(super) fn compute_on(
    id: JurisdictionId,
    scenario: &ApplicationScenario,
    applicant: ApplicantType,
    today: NaiveDate,
) -> FeeBreakdown {
    RuleRegistry::standard().compute_government_fees(id.jurisdiction(), scenario, applicant, today)
}

pub(super) fn labels(breakdown: &FeeBreakdown) -> Vec<&str> {
    breakdown
        .items()
        .iter()
        .map(|item| item.label.as_str())
        .collect()
}
