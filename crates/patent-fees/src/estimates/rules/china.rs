use super::{excess_over, surcharge, BreakdownDraft, FeeContext, GovernmentFeeRule};
use crate::estimates::domain::{
    ApplicationType, FeeBreakdown, Jurisdiction, JurisdictionId, SourceCitation,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const INCLUDED_CLAIMS: u32 = 10;
const INCLUDED_PAGES: u32 = 30;
const PER_CLAIM: Decimal = dec!(150);
const PER_PAGE: Decimal = dec!(50);

/// China National Intellectual Property Administration, invention patents.
pub struct ChinaRules;

impl GovernmentFeeRule for ChinaRules {
    fn jurisdiction(&self) -> Jurisdiction {
        JurisdictionId::Cn.jurisdiction()
    }

    fn sources(&self) -> Vec<SourceCitation> {
        vec![SourceCitation {
            label: "CNIPA patent fee standards",
            url: "https://english.cnipa.gov.cn/transfer/news/officialinformation/1117615.htm",
            as_of: "Published standards used for baseline",
        }]
    }

    fn compute_government_fees(&self, context: &FeeContext<'_>) -> FeeBreakdown {
        let claims = context.scenario.claim_count;
        let pages = context.scenario.page_count;
        let mut draft = BreakdownDraft::new(self.jurisdiction().currency);

        if context.scenario.application_type == ApplicationType::Provisional {
            draft.unsupported("China does not use a standalone provisional patent route.");
        } else {
            draft.item("Application fee", dec!(900));
            draft.item("Publication printing fee", dec!(50));
            draft.item("Substantive examination request", dec!(2500));
            draft.item_if_positive(
                format!(
                    "Additional claims fee ({} claims over {INCLUDED_CLAIMS})",
                    excess_over(claims, INCLUDED_CLAIMS)
                ),
                surcharge(claims, INCLUDED_CLAIMS, PER_CLAIM),
            );
            draft.item_if_positive(
                format!(
                    "Additional pages fee ({} pages over {INCLUDED_PAGES})",
                    excess_over(pages, INCLUDED_PAGES)
                ),
                surcharge(pages, INCLUDED_PAGES, PER_PAGE),
            );
        }

        draft.note("China values here are baseline invention-patent fee components.");
        draft.finish(self.sources())
    }
}
