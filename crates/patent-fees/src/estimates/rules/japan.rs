use super::{excess_over, surcharge, BreakdownDraft, FeeContext, GovernmentFeeRule};
use crate::estimates::domain::{
    ApplicationType, FeeBreakdown, Jurisdiction, JurisdictionId, SourceCitation,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const INCLUDED_CLAIMS: u32 = 10;
const FILING_FEE: Decimal = dec!(14000);
const EXAMINATION_BASE: Decimal = dec!(138000);
const PER_CLAIM: Decimal = dec!(4000);

/// Japan Patent Office.
pub struct JapanRules;

impl GovernmentFeeRule for JapanRules {
    fn jurisdiction(&self) -> Jurisdiction {
        JurisdictionId::Jp.jurisdiction()
    }

    fn sources(&self) -> Vec<SourceCitation> {
        vec![SourceCitation {
            label: "JPO patent fees",
            url: "https://www.jpo.go.jp/e/system/process/tesuryo/hyoujyun_kaitei.html",
            as_of: "Current filing/exam formulas",
        }]
    }

    fn compute_government_fees(&self, context: &FeeContext<'_>) -> FeeBreakdown {
        let claims = context.scenario.claim_count;
        let mut draft = BreakdownDraft::new(self.jurisdiction().currency);

        if context.scenario.application_type == ApplicationType::Provisional {
            draft.unsupported("Japan does not use a standalone provisional patent route.");
        } else {
            draft.item("Patent filing fee", FILING_FEE);
            let covered = claims.min(INCLUDED_CLAIMS);
            draft.item(
                format!("Examination request fee ({covered} claims)"),
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

        draft.note("Japanese examination request fee depends on claim count in this model.");
        draft.finish(self.sources())
    }
}
