use super::{BreakdownDraft, FeeContext, GovernmentFeeRule};
use crate::estimates::domain::{
    ApplicantType, ApplicationType, FeeBreakdown, Jurisdiction, JurisdictionId, SourceCitation,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntitySize {
    Micro,
    Small,
    Large,
}

impl EntitySize {
    fn for_applicant(applicant: ApplicantType) -> Self {
        match applicant {
            ApplicantType::Company => Self::Large,
            ApplicantType::Sme => Self::Small,
            ApplicantType::Startup | ApplicantType::Individual => Self::Micro,
        }
    }
}

struct UtilityFees {
    filing: Decimal,
    search: Decimal,
    examination: Decimal,
}

fn provisional_fee(size: EntitySize) -> Decimal {
    match size {
        EntitySize::Micro => dec!(65),
        EntitySize::Small => dec!(130),
        EntitySize::Large => dec!(325),
    }
}

fn direct_fees(size: EntitySize) -> UtilityFees {
    match size {
        EntitySize::Micro => UtilityFees {
            filing: dec!(70),
            search: dec!(154),
            examination: dec!(176),
        },
        EntitySize::Small => UtilityFees {
            filing: dec!(70),
            search: dec!(308),
            examination: dec!(352),
        },
        EntitySize::Large => UtilityFees {
            filing: dec!(350),
            search: dec!(770),
            examination: dec!(880),
        },
    }
}

fn national_stage_fees(size: EntitySize) -> UtilityFees {
    match size {
        EntitySize::Micro => UtilityFees {
            filing: dec!(70),
            search: dec!(154),
            examination: dec!(176),
        },
        EntitySize::Small => UtilityFees {
            filing: dec!(140),
            search: dec!(308),
            examination: dec!(352),
        },
        EntitySize::Large => UtilityFees {
            filing: dec!(350),
            search: dec!(770),
            examination: dec!(880),
        },
    }
}

/// USPTO utility and provisional fees by entity size.
pub struct UnitedStatesRules;

impl GovernmentFeeRule for UnitedStatesRules {
    fn jurisdiction(&self) -> Jurisdiction {
        JurisdictionId::Us.jurisdiction()
    }

    fn sources(&self) -> Vec<SourceCitation> {
        vec![SourceCitation {
            label: "USPTO current fee schedule",
            url: "https://www.uspto.gov/learning-and-resources/fees-and-payment/uspto-fee-schedule",
            as_of: "Current USPTO table values",
        }]
    }

    fn compute_government_fees(&self, context: &FeeContext<'_>) -> FeeBreakdown {
        let size = EntitySize::for_applicant(context.applicant);
        let mut draft = BreakdownDraft::new(self.jurisdiction().currency);

        match context.scenario.application_type {
            ApplicationType::Provisional => {
                draft.item("Provisional application filing fee", provisional_fee(size));
            }
            ApplicationType::Pct => {
                let fees = national_stage_fees(size);
                draft.item("PCT national stage basic filing fee", fees.filing);
                draft.item("PCT national stage search fee", fees.search);
                draft.item("PCT national stage examination fee", fees.examination);
            }
            ApplicationType::Complete | ApplicationType::Foreign => {
                let fees = direct_fees(size);
                draft.item("Utility nonprovisional filing fee", fees.filing);
                draft.item("Utility search fee", fees.search);
                draft.item("Utility examination fee", fees.examination);
            }
        }

        draft.note(
            "Entity mapping assumption: start-up/individual = micro, SME = small, company = large.",
        );
        draft.finish(self.sources())
    }
}
