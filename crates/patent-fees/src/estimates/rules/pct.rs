use super::{excess_over, surcharge, BreakdownDraft, FeeContext, GovernmentFeeRule};
use crate::estimates::domain::{
    ApplicationType, FeeBreakdown, Jurisdiction, JurisdictionId, SourceCitation,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const INCLUDED_PAGES: u32 = 30;
const INTERNATIONAL_FILING_FEE: Decimal = dec!(1330);
const PER_PAGE: Decimal = dec!(15);

/// WIPO international phase. Fee adjustments entered by the caller apply here only.
pub struct PctRules;

impl GovernmentFeeRule for PctRules {
    fn jurisdiction(&self) -> Jurisdiction {
        JurisdictionId::Pct.jurisdiction()
    }

    fn sources(&self) -> Vec<SourceCitation> {
        vec![SourceCitation {
            label: "WIPO PCT Applicant's Guide - Current PCT Fees",
            url: "https://www.wipo.int/pct/en/guide/fees.html",
            as_of: "International filing fee and page surcharge",
        }]
    }

    fn compute_government_fees(&self, context: &FeeContext<'_>) -> FeeBreakdown {
        let scenario = context.scenario;
        let mut draft = BreakdownDraft::new(self.jurisdiction().currency);

        if scenario.application_type != ApplicationType::Pct {
            draft.unsupported(
                "PCT international fees apply only when the application type is 'PCT Filing'.",
            );
            return draft.finish(self.sources());
        }

        let pages = scenario.page_count;
        draft.item(
            format!("International filing fee (first {INCLUDED_PAGES} pages)"),
            INTERNATIONAL_FILING_FEE,
        );
        draft.item_if_positive(
            format!(
                "Page surcharge ({} pages over {INCLUDED_PAGES})",
                excess_over(pages, INCLUDED_PAGES)
            ),
            surcharge(pages, INCLUDED_PAGES, PER_PAGE),
        );
        if scenario.pct_efiling_reduction > Decimal::ZERO {
            draft.item("e-filing reduction", -scenario.pct_efiling_reduction);
        }
        draft.item_if_positive("Additional user-entered PCT fees", scenario.pct_manual_add_on);

        draft.note(
            "ISA search fees and receiving-office transmittal fees vary and can be added via manual add-on.",
        );
        draft.finish(self.sources())
    }
}
