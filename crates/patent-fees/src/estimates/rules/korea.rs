use super::{excess_over, surcharge, BreakdownDraft, FeeContext, GovernmentFeeRule};
use crate::estimates::domain::{
    ApplicationType, FeeBreakdown, Jurisdiction, JurisdictionId, SourceCitation,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const INCLUDED_CLAIMS: u32 = 10;
const FILING_FEE: Decimal = dec!(46000);
const EXAMINATION_BASE: Decimal = dec!(166000);
const PER_CLAIM: Decimal = dec!(51000);

/// Korean Intellectual Property Office, electronic filing.
pub struct KoreaRules;

impl GovernmentFeeRule for KoreaRules {
    fn jurisdiction(&self) -> Jurisdiction {
        JurisdictionId::Kr.jurisdiction()
    }

    fn sources(&self) -> Vec<SourceCitation> {
        vec![SourceCitation {
            label: "KIPO service fees",
            url: "https://www.kipo.go.kr/en/HtmlApp?c=01080303&catmenu=m03_05_02",
            as_of: "Electronic filing and exam request fee rows",
        }]
    }

    fn compute_government_fees(&self, context: &FeeContext<'_>) -> FeeBreakdown {
        let claims = context.scenario.claim_count;
        let mut draft = BreakdownDraft::new(self.jurisdiction().currency);

        if context.scenario.application_type == ApplicationType::Provisional {
            draft.unsupported("Korea does not use a standalone provisional patent route.");
        } else {
            draft.item("Electronic filing fee", FILING_FEE);
            let covered = claims.min(INCLUDED_CLAIMS);
            draft.item(
                format!("Substantive examination fee ({covered} claims)"),
                EXAMINATION_BASE + Decimal::from(covered) * PER_CLAIM,
            );
            draft.item_if_positive(
                format!(
                    "Additional claims fee ({} claims over {INCLUDED_CLAIMS})",
                    excess_over(claims, INCLUDED_CLAIMS)
                ),
                surcharge(claims, INCLUDED_CLAIMS, PER_CLAIM),
            );
        }

        draft.note(
            "Korean surcharge is claim-based; modify claim count in inputs for scenario checks.",
        );
        draft.finish(self.sources())
    }
}
