use super::{april_2026_schedule, BreakdownDraft, FeeContext, GovernmentFeeRule};
use crate::estimates::domain::{
    ApplicationType, FeeBreakdown, Jurisdiction, JurisdictionId, SourceCitation,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

struct UkFees {
    first: Decimal,
    search: Decimal,
    examination: Decimal,
}

fn direct_fees(revised: bool) -> UkFees {
    if revised {
        UkFees {
            first: dec!(75),
            search: dec!(200),
            examination: dec!(130),
        }
    } else {
        UkFees {
            first: dec!(60),
            search: dec!(150),
            examination: dec!(100),
        }
    }
}

fn national_phase_fees(revised: bool) -> UkFees {
    if revised {
        UkFees {
            first: dec!(30),
            search: dec!(160),
            examination: dec!(130),
        }
    } else {
        UkFees {
            first: dec!(30),
            search: dec!(120),
            examination: dec!(100),
        }
    }
}

/// UK Intellectual Property Office.
pub struct UnitedKingdomRules;

impl GovernmentFeeRule for UnitedKingdomRules {
    fn jurisdiction(&self) -> Jurisdiction {
        JurisdictionId::Uk.jurisdiction()
    }

    fn sources(&self) -> Vec<SourceCitation> {
        vec![
            SourceCitation {
                label: "UK IPO patent fees",
                url: "https://www.gov.uk/government/publications/patent-forms-and-fees/patent-forms-and-fees",
                as_of: "Current UK IPO fee table",
            },
            SourceCitation {
                label: "UK IPO proposed fee changes",
                url: "https://www.gov.uk/government/consultations/patent-fees-proposal-to-increase-fees-in-april-2026",
                as_of: "Future update context",
            },
        ]
    }

    fn compute_government_fees(&self, context: &FeeContext<'_>) -> FeeBreakdown {
        let revised = april_2026_schedule(context.today);
        let mut draft = BreakdownDraft::new(self.jurisdiction().currency);

        match context.scenario.application_type {
            ApplicationType::Provisional => {
                draft.unsupported("UK has no standalone provisional patent filing route.");
            }
            ApplicationType::Pct => {
                let fees = national_phase_fees(revised);
                draft.item("PCT national phase entry", fees.first);
                draft.item("Search (where no extra UK search needed)", fees.search);
                draft.item("Substantive examination", fees.examination);
            }
            ApplicationType::Complete | ApplicationType::Foreign => {
                let fees = direct_fees(revised);
                draft.item("Application fee", fees.first);
                draft.item("Request for search", fees.search);
                draft.item("Request for examination", fees.examination);
            }
        }

        if !revised {
            draft.note("UK fees have a published proposal for increase from April 2026.");
        }
        draft.finish(self.sources())
    }
}
