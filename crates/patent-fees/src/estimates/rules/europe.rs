use super::{april_2026_schedule, BreakdownDraft, FeeContext, GovernmentFeeRule};
use crate::estimates::domain::{
    ApplicationType, EpValidationCountry, FeeBreakdown, Jurisdiction, JurisdictionId,
    SourceCitation,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

struct EpoFees {
    filing: Decimal,
    search: Decimal,
    designation: Decimal,
    examination: Decimal,
}

impl EpoFees {
    fn for_date(revised: bool) -> Self {
        if revised {
            Self {
                filing: dec!(135),
                search: dec!(1595),
                designation: dec!(720),
                examination: dec!(2010),
            }
        } else {
            Self {
                filing: dec!(135),
                search: dec!(1520),
                designation: dec!(685),
                examination: dec!(1915),
            }
        }
    }
}

/// European Patent Office, including optional post-grant validation estimates.
pub struct EuropeanPatentRules;

impl GovernmentFeeRule for EuropeanPatentRules {
    fn jurisdiction(&self) -> Jurisdiction {
        JurisdictionId::Ep.jurisdiction()
    }

    fn sources(&self) -> Vec<SourceCitation> {
        vec![SourceCitation {
            label: "EPO fee schedule",
            url: "https://www.epo.org/en/applying/fees",
            as_of: "Current schedule + announced 1 Apr 2026 values",
        }]
    }

    fn compute_government_fees(&self, context: &FeeContext<'_>) -> FeeBreakdown {
        let scenario = context.scenario;
        let revised = april_2026_schedule(context.today);
        let mut draft = BreakdownDraft::new(self.jurisdiction().currency);

        if scenario.application_type == ApplicationType::Provisional {
            draft.unsupported("EP has no provisional filing route.");
            return draft.finish(self.sources());
        }

        let fees = EpoFees::for_date(revised);
        draft.item("Filing fee", fees.filing);
        draft.item("Search fee", fees.search);
        draft.item("Designation fee (all EPC states)", fees.designation);
        draft.item("Examination fee", fees.examination);

        if scenario.application_type == ApplicationType::Pct {
            draft.note("Euro-PCT cases can vary if supplementary search is waived or reduced.");
        }

        if scenario.application_type.reaches_validation() {
            for country in EpValidationCountry::ordered() {
                let Some(entry) = scenario.ep_validation.get(&country) else {
                    continue;
                };
                if entry.enabled {
                    draft.item_if_positive(
                        format!("Post-grant validation estimate ({})", country.name()),
                        entry.amount,
                    );
                }
            }
            draft.note(
                "Validation rows are user-entered estimates and not official EPO fee-table values.",
            );
        }

        draft.finish(self.sources())
    }
}
