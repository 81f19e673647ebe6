use super::{BreakdownDraft, FeeContext, GovernmentFeeRule};
use crate::estimates::domain::{
    ApplicationType, FeeBreakdown, Jurisdiction, JurisdictionId, SourceCitation,
};
use rust_decimal_macros::dec;

/// IP Australia standard and provisional patents.
pub struct AustraliaRules;

impl GovernmentFeeRule for AustraliaRules {
    fn jurisdiction(&self) -> Jurisdiction {
        JurisdictionId::Au.jurisdiction()
    }

    fn sources(&self) -> Vec<SourceCitation> {
        vec![SourceCitation {
            label: "IP Australia patent fees",
            url: "https://www.ipaustralia.gov.au/manage-my-ip/fees-and-payment/patent-fees",
            as_of: "Current published fee rows",
        }]
    }

    fn compute_government_fees(&self, context: &FeeContext<'_>) -> FeeBreakdown {
        let mut draft = BreakdownDraft::new(self.jurisdiction().currency);

        if context.scenario.application_type == ApplicationType::Provisional {
            draft.item("Provisional filing fee", dec!(100));
        } else {
            draft.item("Standard patent filing fee", dec!(400));
            draft.item("Examination request fee", dec!(550));
        }

        draft.finish(self.sources())
    }
}
