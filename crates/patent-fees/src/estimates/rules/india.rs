use super::{BreakdownDraft, FeeContext, GovernmentFeeRule};
use crate::estimates::domain::{
    ApplicantType, ApplicationType, FeeBreakdown, Jurisdiction, JurisdictionId, SourceCitation,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndiaTier {
    Small,
    Large,
}

impl IndiaTier {
    fn for_applicant(applicant: ApplicantType) -> Self {
        match applicant {
            ApplicantType::Company => Self::Large,
            ApplicantType::Startup | ApplicantType::Individual | ApplicantType::Sme => Self::Small,
        }
    }

    fn filing(self) -> Decimal {
        match self {
            Self::Small => dec!(1600),
            Self::Large => dec!(8000),
        }
    }

    fn examination(self) -> Decimal {
        match self {
            Self::Small => dec!(4000),
            Self::Large => dec!(20000),
        }
    }

    fn pct_transmittal(self) -> Decimal {
        match self {
            Self::Small => dec!(3200),
            Self::Large => dec!(16000),
        }
    }
}

/// Indian Patent Office, First Schedule fees.
pub struct IndiaRules;

impl GovernmentFeeRule for IndiaRules {
    fn jurisdiction(&self) -> Jurisdiction {
        JurisdictionId::In.jurisdiction()
    }

    fn sources(&self) -> Vec<SourceCitation> {
        vec![
            SourceCitation {
                label: "India Patent Rules (First Schedule)",
                url: "https://ipindia.gov.in/writereaddata/Portal/ev/rules/patent-rules-2003-12-08-2024.pdf",
                as_of: "Official schedule (latest amendment PDF)",
            },
            SourceCitation {
                label: "English fee table rendering (reference)",
                url: "https://www.jpo.go.jp/e/system/laws/rule/guideline/document/index/fourth_schedule.pdf",
                as_of: "Used for fee-row verification",
            },
        ]
    }

    fn compute_government_fees(&self, context: &FeeContext<'_>) -> FeeBreakdown {
        let tier = IndiaTier::for_applicant(context.applicant);
        let mut draft = BreakdownDraft::new(self.jurisdiction().currency);

        match context.scenario.application_type {
            ApplicationType::Provisional => {
                draft.item("Patent filing fee (Form 1/2)", tier.filing());
            }
            ApplicationType::Foreign => {
                draft.item("Patent filing fee (Form 1/2)", tier.filing());
                draft.note(
                    "Request for examination (Form 18) is deferred for convention filings and not included.",
                );
            }
            ApplicationType::Complete => {
                draft.item("Patent filing fee (Form 1/2)", tier.filing());
                draft.item("Request for examination (Form 18)", tier.examination());
            }
            ApplicationType::Pct => {
                draft.item("PCT transmittal fee (RO/IN)", tier.pct_transmittal());
                draft.note("WIPO international filing fee is shown in the PCT entry (CHF).");
            }
        }

        draft.note("Startup/individual/SME treated under the same fee tier in this model.");
        draft.finish(self.sources())
    }
}
