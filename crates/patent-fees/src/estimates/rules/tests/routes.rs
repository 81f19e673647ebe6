use rust_decimal_macros::dec;

use super::common::*;
use crate::estimates::domain::{
    ApplicantType, ApplicationType, EpValidationCountry, EpValidationEntry, JurisdictionId,
};

#[test]
fn india_foreign_startup_charges_small_entity_filing_only() {
    let breakdown = compute(
        JurisdictionId::In,
        &scenario(ApplicationType::Foreign),
        ApplicantType::Startup,
    );

    assert!(!breakdown.is_unsupported());
    assert_eq!(breakdown.items().len(), 1);
    assert_eq!(breakdown.items()[0].label, "Patent filing fee (Form 1/2)");
    assert_eq!(breakdown.items()[0].amount, dec!(1600));
    assert_eq!(breakdown.total(), Some(dec!(1600)));
}

#[test]
fn india_company_complete_uses_large_tier_with_examination() {
    let breakdown = compute(
        JurisdictionId::In,
        &scenario(ApplicationType::Complete),
        ApplicantType::Company,
    );

    assert_eq!(breakdown.total(), Some(dec!(28000)));
    assert_eq!(
        breakdown
            .item("Request for examination")
            .expect("examination present")
            .amount,
        dec!(20000)
    );
}

#[test]
fn india_pct_routes_through_transmittal() {
    let breakdown = compute(
        JurisdictionId::In,
        &scenario(ApplicationType::Pct),
        ApplicantType::Sme,
    );

    assert_eq!(labels(&breakdown), ["PCT transmittal fee (RO/IN)"]);
    assert_eq!(breakdown.total(), Some(dec!(3200)));
    assert!(breakdown.notes().iter().any(|note| note.contains("WIPO")));
}

#[test]
fn ep_has_no_provisional_route() {
    let breakdown = compute(
        JurisdictionId::Ep,
        &scenario(ApplicationType::Provisional),
        ApplicantType::Startup,
    );

    assert_eq!(
        breakdown.unsupported_reason(),
        Some("EP has no provisional filing route.")
    );
    assert!(breakdown.items().is_empty());
    assert_eq!(breakdown.total(), None);
    assert!(!breakdown.sources().is_empty());
}

#[test]
fn provisional_is_unsupported_where_no_route_exists() {
    let provisional = scenario(ApplicationType::Provisional);
    for id in [
        JurisdictionId::Ep,
        JurisdictionId::Uk,
        JurisdictionId::Kr,
        JurisdictionId::Jp,
        JurisdictionId::Cn,
        JurisdictionId::Pct,
    ] {
        let breakdown = compute(id, &provisional, ApplicantType::Sme);
        assert!(breakdown.is_unsupported(), "{id} should be unsupported");
        assert!(breakdown.items().is_empty(), "{id} carried items");
    }

    for id in [JurisdictionId::In, JurisdictionId::Us, JurisdictionId::Au] {
        let breakdown = compute(id, &provisional, ApplicantType::Sme);
        assert!(!breakdown.is_unsupported(), "{id} has a provisional route");
        assert_eq!(breakdown.items().len(), 1);
    }
}

#[test]
fn us_entity_sizes_follow_applicant_mapping() {
    let complete = scenario(ApplicationType::Complete);

    let micro = compute(JurisdictionId::Us, &complete, ApplicantType::Individual);
    let small = compute(JurisdictionId::Us, &complete, ApplicantType::Sme);
    let large = compute(JurisdictionId::Us, &complete, ApplicantType::Company);

    assert_eq!(micro.total(), Some(dec!(400)));
    assert_eq!(small.total(), Some(dec!(730)));
    assert_eq!(large.total(), Some(dec!(2000)));
    assert!(micro.notes()[0].contains("Entity mapping assumption"));
}

#[test]
fn us_small_entity_national_stage_differs_from_direct_filing() {
    let breakdown = compute(
        JurisdictionId::Us,
        &scenario(ApplicationType::Pct),
        ApplicantType::Sme,
    );

    assert_eq!(
        breakdown
            .item("PCT national stage basic filing fee")
            .expect("basic filing fee")
            .amount,
        dec!(140)
    );
}

#[test]
fn pct_entry_requires_pct_application_type() {
    for application_type in [
        ApplicationType::Provisional,
        ApplicationType::Complete,
        ApplicationType::Foreign,
    ] {
        let breakdown = compute(
            JurisdictionId::Pct,
            &scenario(application_type),
            ApplicantType::Startup,
        );
        let reason = breakdown.unsupported_reason().expect("unsupported");
        assert!(reason.contains("PCT Filing"));
        assert!(breakdown.items().is_empty());
    }
}

#[test]
fn pct_adjustments_apply_only_to_international_entry() {
    let mut pct = scenario(ApplicationType::Pct);
    pct.pct_efiling_reduction = dec!(200);
    pct.pct_manual_add_on = dec!(350);

    let international = compute(JurisdictionId::Pct, &pct, ApplicantType::Startup);
    assert_eq!(
        labels(&international),
        [
            "International filing fee (first 30 pages)",
            "e-filing reduction",
            "Additional user-entered PCT fees",
        ]
    );
    assert_eq!(
        international.item("e-filing reduction").expect("reduction").amount,
        dec!(-200)
    );
    assert_eq!(international.total(), Some(dec!(1480)));

    for id in [JurisdictionId::Us, JurisdictionId::Uk, JurisdictionId::In] {
        let national = compute(id, &pct, ApplicantType::Startup);
        assert!(national.item("e-filing reduction").is_none());
        assert!(national.item("Additional user-entered PCT fees").is_none());
    }
}

#[test]
fn ep_validation_rows_follow_enabled_positive_entries() {
    let mut pct = scenario(ApplicationType::Pct);
    pct.ep_validation.insert(
        EpValidationCountry::De,
        EpValidationEntry {
            enabled: true,
            amount: dec!(400),
        },
    );
    pct.ep_validation.insert(
        EpValidationCountry::Fr,
        EpValidationEntry {
            enabled: false,
            amount: dec!(300),
        },
    );
    pct.ep_validation.insert(
        EpValidationCountry::Ch,
        EpValidationEntry {
            enabled: true,
            amount: dec!(0),
        },
    );

    let breakdown = compute(JurisdictionId::Ep, &pct, ApplicantType::Company);

    assert_eq!(
        breakdown
            .item("Post-grant validation estimate (Germany)")
            .expect("germany row")
            .amount,
        dec!(400)
    );
    assert!(breakdown.item("Post-grant validation estimate (France)").is_none());
    assert!(breakdown.item("Post-grant validation estimate (Switzerland)").is_none());
    assert_eq!(breakdown.items().len(), 5);
    assert!(breakdown
        .notes()
        .iter()
        .any(|note| note.contains("user-entered estimates")));

    let mut foreign = pct.clone();
    foreign.application_type = ApplicationType::Foreign;
    let breakdown = compute(JurisdictionId::Ep, &foreign, ApplicantType::Company);
    assert!(breakdown.item("Post-grant validation estimate (Germany)").is_some());

    let mut complete = pct.clone();
    complete.application_type = ApplicationType::Complete;
    let breakdown = compute(JurisdictionId::Ep, &complete, ApplicantType::Company);
    assert!(breakdown.item("Post-grant validation estimate").is_none());
    assert_eq!(breakdown.items().len(), 4);
}

#[test]
fn australia_separates_provisional_from_standard() {
    let provisional = compute(
        JurisdictionId::Au,
        &scenario(ApplicationType::Provisional),
        ApplicantType::Startup,
    );
    let standard = compute(
        JurisdictionId::Au,
        &scenario(ApplicationType::Foreign),
        ApplicantType::Startup,
    );

    assert_eq!(provisional.total(), Some(dec!(100)));
    assert_eq!(standard.total(), Some(dec!(950)));
    assert!(standard.notes().is_empty());
}
