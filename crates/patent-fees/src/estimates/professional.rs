use super::currency::CurrencyNormalizer;
use super::domain::{
    ApplicantType, ApplicationScenario, ApplicationType, Currency, PriorArtSearch,
    ProfessionalFeeSchedule,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Professional service line, priced in the reference currency.
///
/// `amount_local` is `None` when the target currency has no usable rate; the
/// reference amount is reported regardless.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfessionalFeeItem {
    pub label: String,
    pub amount_reference: Decimal,
    pub amount_local: Option<Decimal>,
}

pub fn compute_professional_fees(
    scenario: &ApplicationScenario,
    applicant: ApplicantType,
    schedule: &ProfessionalFeeSchedule,
    normalizer: &CurrencyNormalizer<'_>,
    target: Currency,
) -> Vec<ProfessionalFeeItem> {
    let factor = applicant.multiplier();

    selected_services(scenario, schedule)
        .into_iter()
        .map(|(label, base)| {
            let amount_reference = scaled(base, factor);
            ProfessionalFeeItem {
                label: label.to_string(),
                amount_reference,
                amount_local: normalizer.from_reference(amount_reference, target),
            }
        })
        .collect()
}

/// At most one search line and one drafting/filing line.
fn selected_services(
    scenario: &ApplicationScenario,
    schedule: &ProfessionalFeeSchedule,
) -> Vec<(&'static str, Decimal)> {
    let mut services = Vec::with_capacity(2);

    match scenario.prior_art {
        PriorArtSearch::None => {}
        PriorArtSearch::Quick => services.push(("Quick prior-art search", schedule.quick_search)),
        PriorArtSearch::Extensive => {
            services.push(("Extensive prior-art search", schedule.extensive_search))
        }
    }

    services.push(match scenario.application_type {
        ApplicationType::Provisional => (
            "Provisional drafting professional fee",
            schedule.provisional,
        ),
        ApplicationType::Complete => (
            "Complete drafting & filing professional fee",
            schedule.complete,
        ),
        ApplicationType::Foreign => ("Foreign filing professional fee", schedule.foreign),
        ApplicationType::Pct => ("PCT filing professional fee", schedule.pct),
    });

    services
}

/// `round(base * factor)` to whole reference units, halves away from zero.
fn scaled(base: Decimal, factor: Decimal) -> Decimal {
    (base * factor).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimates::currency::RateTable;
    use rust_decimal_macros::dec;

    #[test]
    fn startup_quick_search_and_foreign_filing_in_inr() {
        let table = RateTable::fallback();
        let mut scenario = ApplicationScenario::new(ApplicationType::Foreign);
        scenario.prior_art = PriorArtSearch::Quick;

        let items = compute_professional_fees(
            &scenario,
            ApplicantType::Startup,
            &ProfessionalFeeSchedule::default(),
            &table.normalizer(),
            Currency::Inr,
        );

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label, "Quick prior-art search");
        assert_eq!(items[0].amount_reference, dec!(10800));
        assert_eq!(items[0].amount_local, Some(dec!(10800)));
        assert_eq!(items[1].label, "Foreign filing professional fee");
        assert_eq!(items[1].amount_reference, dec!(45000));
    }

    #[test]
    fn applicant_type_changes_only_the_multiplier() {
        let table = RateTable::fallback();
        let mut scenario = ApplicationScenario::new(ApplicationType::Pct);
        scenario.prior_art = PriorArtSearch::Extensive;
        let schedule = ProfessionalFeeSchedule::default();

        for applicant in [
            ApplicantType::Startup,
            ApplicantType::Individual,
            ApplicantType::Sme,
            ApplicantType::Company,
        ] {
            let items = compute_professional_fees(
                &scenario,
                applicant,
                &schedule,
                &table.normalizer(),
                Currency::Eur,
            );
            let expected = (schedule.pct * applicant.multiplier())
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            assert_eq!(items[1].label, "PCT filing professional fee");
            assert_eq!(items[1].amount_reference, expected);
        }
    }

    #[test]
    fn halves_round_away_from_zero() {
        assert_eq!(scaled(dec!(12345), dec!(0.9)), dec!(11111));
        assert_eq!(scaled(dec!(10), dec!(0.95)), dec!(10));
        assert_eq!(scaled(dec!(30), dec!(0.95)), dec!(29));
        assert_eq!(scaled(dec!(5), dec!(0.9)), dec!(5));
    }

    #[test]
    fn no_search_selected_yields_single_line() {
        let table = RateTable::fallback();
        let scenario = ApplicationScenario::new(ApplicationType::Provisional);

        let items = compute_professional_fees(
            &scenario,
            ApplicantType::Sme,
            &ProfessionalFeeSchedule::default(),
            &table.normalizer(),
            Currency::Usd,
        );

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].amount_reference, dec!(30000));
        assert!(items[0].amount_local.is_some());
    }
}
