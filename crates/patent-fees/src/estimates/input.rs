//! Boundary types for raw caller input; every number is coerced here before the engine
//! sees it.

use super::domain::{
    coerce_amount, coerce_count, ApplicantType, ApplicationScenario, ApplicationType,
    EpValidationCountry, EpValidationEntry, JurisdictionId, PriorArtSearch,
    ProfessionalFeeSchedule, UnknownCode,
};
use super::service::{EstimateRequest, EstimateScope};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;

fn default_scope() -> String {
    "all".to_string()
}

fn default_claims() -> f64 {
    10.0
}

fn default_pages() -> f64 {
    30.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct EstimateRequestBody {
    /// `all` or a jurisdiction code such as `EP`.
    #[serde(default = "default_scope")]
    pub scope: String,
    pub applicant_type: ApplicantType,
    pub application_type: ApplicationType,
    #[serde(default)]
    pub prior_art: PriorArtSearch,
    #[serde(default = "default_claims")]
    pub claim_count: f64,
    #[serde(default = "default_pages")]
    pub page_count: f64,
    #[serde(default)]
    pub pct_efiling_reduction: f64,
    #[serde(default)]
    pub pct_manual_add_on: f64,
    #[serde(default)]
    pub ep_validation: BTreeMap<EpValidationCountry, EpValidationInput>,
    #[serde(default)]
    pub professional_fees: ProfessionalFeeInput,
    /// Overrides the schedule date; defaults to the current date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct EpValidationInput {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub amount: f64,
}

/// Overrides for the default professional fee table.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ProfessionalFeeInput {
    pub quick_search: Option<f64>,
    pub extensive_search: Option<f64>,
    pub provisional: Option<f64>,
    pub complete: Option<f64>,
    pub foreign: Option<f64>,
    pub pct: Option<f64>,
}

impl ProfessionalFeeInput {
    pub fn into_schedule(self) -> ProfessionalFeeSchedule {
        let defaults = ProfessionalFeeSchedule::default();
        let pick = |raw: Option<f64>, fallback| raw.map(coerce_amount).unwrap_or(fallback);

        ProfessionalFeeSchedule {
            quick_search: pick(self.quick_search, defaults.quick_search),
            extensive_search: pick(self.extensive_search, defaults.extensive_search),
            provisional: pick(self.provisional, defaults.provisional),
            complete: pick(self.complete, defaults.complete),
            foreign: pick(self.foreign, defaults.foreign),
            pct: pick(self.pct, defaults.pct),
        }
    }
}

pub fn parse_scope(raw: &str) -> Result<EstimateScope, UnknownCode> {
    if raw.trim().eq_ignore_ascii_case("all") {
        return Ok(EstimateScope::All);
    }
    raw.parse::<JurisdictionId>().map(EstimateScope::Single)
}

impl EstimateRequestBody {
    pub fn into_request(self) -> Result<EstimateRequest, UnknownCode> {
        let scope = parse_scope(&self.scope)?;

        let ep_validation = self
            .ep_validation
            .into_iter()
            .map(|(country, entry)| {
                (
                    country,
                    EpValidationEntry {
                        enabled: entry.enabled,
                        amount: coerce_amount(entry.amount),
                    },
                )
            })
            .collect();

        let scenario = ApplicationScenario {
            application_type: self.application_type,
            prior_art: self.prior_art,
            claim_count: coerce_count(self.claim_count),
            page_count: coerce_count(self.page_count),
            pct_efiling_reduction: coerce_amount(self.pct_efiling_reduction),
            pct_manual_add_on: coerce_amount(self.pct_manual_add_on),
            ep_validation,
        };

        Ok(EstimateRequest {
            scope,
            applicant: self.applicant_type,
            scenario,
            professional_fees: self.professional_fees.into_schedule(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn counts_and_amounts_are_clamped_to_floor() {
        assert_eq!(coerce_count(0.0), 1);
        assert_eq!(coerce_count(-4.0), 1);
        assert_eq!(coerce_count(f64::NAN), 1);
        assert_eq!(coerce_count(f64::INFINITY), 1);
        assert_eq!(coerce_count(15.7), 15);
        assert_eq!(coerce_amount(-20.0), Decimal::ZERO);
        assert_eq!(coerce_amount(f64::NAN), Decimal::ZERO);
        assert_eq!(coerce_amount(250.0), dec!(250));
    }

    #[test]
    fn body_defaults_fill_missing_fields() {
        let body: EstimateRequestBody = serde_json::from_value(json!({
            "applicant_type": "startup",
            "application_type": "foreign",
            "prior_art": "quick"
        }))
        .expect("body parses");

        let request = body.into_request().expect("scope resolves");
        assert_eq!(request.scope, EstimateScope::All);
        assert_eq!(request.scenario.claim_count, 10);
        assert_eq!(request.scenario.page_count, 30);
        assert_eq!(request.professional_fees, ProfessionalFeeSchedule::default());
    }

    #[test]
    fn overrides_and_scope_are_applied() {
        let body: EstimateRequestBody = serde_json::from_value(json!({
            "scope": "ep",
            "applicant_type": "company",
            "application_type": "pct",
            "claim_count": 0,
            "ep_validation": { "de": { "enabled": true, "amount": -50 } },
            "professional_fees": { "pct": 80000 }
        }))
        .expect("body parses");

        let request = body.into_request().expect("scope resolves");
        assert_eq!(request.scope, EstimateScope::Single(JurisdictionId::Ep));
        assert_eq!(request.scenario.claim_count, 1);
        assert_eq!(
            request.scenario.ep_validation[&EpValidationCountry::De].amount,
            Decimal::ZERO
        );
        assert_eq!(request.professional_fees.pct, dec!(80000));
        assert_eq!(request.professional_fees.foreign, dec!(50000));
    }

    #[test]
    fn unknown_scope_is_rejected() {
        assert!(parse_scope("XX").is_err());
        assert_eq!(parse_scope(" ALL ").expect("all"), EstimateScope::All);
    }
}
