use super::aggregate::{aggregate, JurisdictionResult};
use super::currency::{RateMetadata, RateProvider, RateRefresher, RateTable, RefreshOutcome};
use super::domain::{
    ApplicantType, ApplicationScenario, Currency, Jurisdiction, JurisdictionId,
    ProfessionalFeeSchedule,
};
use super::professional::compute_professional_fees;
use super::ranking::rank;
use super::rules::RuleRegistry;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which jurisdictions a single estimate covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "jurisdiction")]
pub enum EstimateScope {
    All,
    Single(JurisdictionId),
}

impl EstimateScope {
    pub fn jurisdictions(self) -> Vec<Jurisdiction> {
        match self {
            Self::All => Jurisdiction::all(),
            Self::Single(id) => vec![id.jurisdiction()],
        }
    }
}

/// Fully populated input for one recomputation.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateRequest {
    pub scope: EstimateScope,
    pub applicant: ApplicantType,
    pub scenario: ApplicationScenario,
    pub professional_fees: ProfessionalFeeSchedule,
}

/// Row of the cross-jurisdiction summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub jurisdiction: JurisdictionId,
    pub name: &'static str,
    pub currency: Currency,
    pub government_local: Option<Decimal>,
    pub total_reference: Option<Decimal>,
}

impl From<&JurisdictionResult> for SummaryRow {
    fn from(result: &JurisdictionResult) -> Self {
        Self {
            jurisdiction: result.jurisdiction.id,
            name: result.jurisdiction.name,
            currency: result.jurisdiction.currency,
            government_local: result.government_local,
            total_reference: result.total_reference,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSnapshot {
    pub reference: Currency,
    pub metadata: RateMetadata,
    pub status: String,
    /// Reference units per one unit of each currency.
    pub quotes: BTreeMap<Currency, Decimal>,
}

impl From<&RateTable> for RateSnapshot {
    fn from(table: &RateTable) -> Self {
        let quotes = Currency::all()
            .into_iter()
            .filter_map(|currency| {
                table
                    .reference_per_unit(currency)
                    .map(|quote| (currency, quote))
            })
            .collect();

        Self {
            reference: table.reference(),
            metadata: table.metadata().clone(),
            status: table.metadata().status_line(),
            quotes,
        }
    }
}

/// Per-jurisdiction detail for card-style output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JurisdictionCard {
    #[serde(flatten)]
    pub result: JurisdictionResult,
    pub rate_note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateReport {
    pub evaluated_on: NaiveDate,
    pub applicant_label: &'static str,
    pub application_label: &'static str,
    pub rates: RateSnapshot,
    pub summary: Vec<SummaryRow>,
    pub cards: Vec<JurisdictionCard>,
}

impl EstimateReport {
    pub fn card(&self, id: JurisdictionId) -> Option<&JurisdictionResult> {
        self.cards
            .iter()
            .map(|card| &card.result)
            .find(|result| result.jurisdiction.id == id)
    }
}

/// Runs the full pipeline against one rate snapshot.
pub fn estimate(
    registry: &RuleRegistry,
    rates: &RateTable,
    request: &EstimateRequest,
    today: NaiveDate,
) -> EstimateReport {
    let scenario = request.scenario.clone().sanitized();
    let schedule = request.professional_fees.clone().sanitized();
    let normalizer = rates.normalizer();

    let results: Vec<JurisdictionResult> = request
        .scope
        .jurisdictions()
        .into_iter()
        .map(|jurisdiction| {
            let government = registry.compute_government_fees(
                jurisdiction,
                &scenario,
                request.applicant,
                today,
            );
            let professional = compute_professional_fees(
                &scenario,
                request.applicant,
                &schedule,
                &normalizer,
                jurisdiction.currency,
            );
            aggregate(jurisdiction, government, professional, &normalizer)
        })
        .collect();

    let summary = rank(results.clone()).iter().map(SummaryRow::from).collect();
    let cards = results
        .into_iter()
        .map(|result| JurisdictionCard {
            rate_note: rates.rate_note(result.jurisdiction.currency),
            result,
        })
        .collect();

    EstimateReport {
        evaluated_on: today,
        applicant_label: request.applicant.label(),
        application_label: scenario.application_type.label(),
        rates: RateSnapshot::from(rates),
        summary,
        cards,
    }
}

/// Long-lived service combining the rule registry with the shared rate table.
pub struct EstimateService<P> {
    registry: RuleRegistry,
    refresher: RateRefresher<P>,
}

impl<P> EstimateService<P>
where
    P: RateProvider + 'static,
{
    pub fn new(registry: RuleRegistry, refresher: RateRefresher<P>) -> Self {
        Self {
            registry,
            refresher,
        }
    }

    pub fn refresher(&self) -> &RateRefresher<P> {
        &self.refresher
    }

    /// Computes against whatever rates are current; never waits on a refresh.
    pub fn estimate(&self, request: &EstimateRequest, today: NaiveDate) -> EstimateReport {
        let rates = self.refresher.table().snapshot();
        estimate(&self.registry, &rates, request, today)
    }

    pub fn rates(&self) -> RateSnapshot {
        RateSnapshot::from(self.refresher.table().snapshot().as_ref())
    }

    pub async fn refresh_rates(&self) -> RefreshOutcome {
        self.refresher.refresh().await
    }
}
