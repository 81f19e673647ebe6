use super::currency::CurrencyNormalizer;
use super::domain::{FeeBreakdown, Jurisdiction};
use super::professional::ProfessionalFeeItem;
use rust_decimal::Decimal;
use serde::Serialize;

/// Government and professional fees for one jurisdiction with derived totals.
///
/// Every `None` figure is unavailable: either the route is unsupported or a
/// conversion lacked a rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JurisdictionResult {
    pub jurisdiction: Jurisdiction,
    pub government: FeeBreakdown,
    pub professional: Vec<ProfessionalFeeItem>,
    pub government_local: Option<Decimal>,
    pub government_reference: Option<Decimal>,
    pub professional_reference: Decimal,
    pub professional_local: Option<Decimal>,
    pub total_local: Option<Decimal>,
    pub total_reference: Option<Decimal>,
}

impl JurisdictionResult {
    pub fn is_available(&self) -> bool {
        self.total_reference.is_some()
    }
}

pub fn aggregate(
    jurisdiction: Jurisdiction,
    government: FeeBreakdown,
    professional: Vec<ProfessionalFeeItem>,
    normalizer: &CurrencyNormalizer<'_>,
) -> JurisdictionResult {
    let government_local = government.total();
    let government_reference =
        government_local.and_then(|local| normalizer.to_reference(local, government.currency()));

    // Summed from reference amounts so rounding is not compounded through local values.
    let professional_reference: Decimal = professional
        .iter()
        .map(|item| item.amount_reference)
        .sum();
    let professional_local =
        normalizer.from_reference(professional_reference, government.currency());

    let (total_local, total_reference) = match (
        government_local,
        government_reference,
        professional_local,
    ) {
        (Some(gov_local), Some(gov_reference), Some(pro_local)) => (
            gov_local.checked_add(pro_local),
            gov_reference.checked_add(professional_reference),
        ),
        _ => (None, None),
    };

    // Both totals or neither.
    let (total_local, total_reference) = match (total_local, total_reference) {
        (Some(local), Some(reference)) => (Some(local), Some(reference)),
        _ => (None, None),
    };

    JurisdictionResult {
        jurisdiction,
        government,
        professional,
        government_local,
        government_reference,
        professional_reference,
        professional_local,
        total_local,
        total_reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimates::currency::{RateMetadata, RateTable};
    use crate::estimates::domain::{Currency, FeeLineItem, JurisdictionId};
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn professional_line(amount: Decimal) -> ProfessionalFeeItem {
        ProfessionalFeeItem {
            label: "Foreign filing professional fee".to_string(),
            amount_reference: amount,
            amount_local: None,
        }
    }

    #[test]
    fn unsupported_route_never_totals() {
        let table = RateTable::fallback();
        let jurisdiction = JurisdictionId::Ep.jurisdiction();
        let government = FeeBreakdown::unsupported(
            Currency::Eur,
            "EP has no provisional filing route.",
            Vec::new(),
            Vec::new(),
        );

        let result = aggregate(
            jurisdiction,
            government,
            vec![professional_line(dec!(27000))],
            &table.normalizer(),
        );

        assert_eq!(result.government_local, None);
        assert_eq!(result.total_local, None);
        assert_eq!(result.total_reference, None);
        assert_eq!(result.professional_reference, dec!(27000));
    }

    #[test]
    fn missing_rate_suppresses_both_totals() {
        let table = RateTable::new(
            Currency::Inr,
            BTreeMap::new(),
            RateMetadata {
                source: "empty".to_string(),
                as_of: None,
                fetched_at: None,
                fallback: false,
            },
        );
        let government = FeeBreakdown::priced(
            Currency::Usd,
            vec![FeeLineItem::new("Utility nonprovisional filing fee", dec!(70))],
            Vec::new(),
            Vec::new(),
        );

        let result = aggregate(
            JurisdictionId::Us.jurisdiction(),
            government,
            vec![professional_line(dec!(45000))],
            &table.normalizer(),
        );

        assert_eq!(result.government_local, Some(dec!(70)));
        assert_eq!(result.government_reference, None);
        assert_eq!(result.professional_local, None);
        assert_eq!(result.professional_reference, dec!(45000));
        assert!(!result.is_available());
        assert_eq!(result.total_local, None);
    }

    #[test]
    fn negative_items_reduce_totals() {
        let table = RateTable::fallback();
        let government = FeeBreakdown::priced(
            Currency::Inr,
            vec![
                FeeLineItem::new("Patent filing fee (Form 1/2)", dec!(1600)),
                FeeLineItem::new("e-filing reduction", dec!(-100)),
            ],
            Vec::new(),
            Vec::new(),
        );

        let result = aggregate(
            JurisdictionId::In.jurisdiction(),
            government,
            Vec::new(),
            &table.normalizer(),
        );

        assert_eq!(result.total_local, Some(dec!(1500)));
        assert_eq!(result.total_reference, Some(dec!(1500)));
    }
}
