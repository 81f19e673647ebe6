//! Government fee rules, one independent variant per jurisdiction.

mod australia;
mod china;
mod europe;
mod india;
mod japan;
mod korea;
mod pct;
mod united_kingdom;
mod united_states;

pub use australia::AustraliaRules;
pub use china::ChinaRules;
pub use europe::EuropeanPatentRules;
pub use india::IndiaRules;
pub use japan::JapanRules;
pub use korea::KoreaRules;
pub use pct::PctRules;
pub use united_kingdom::UnitedKingdomRules;
pub use united_states::UnitedStatesRules;

use super::domain::{
    ApplicantType, ApplicationScenario, Currency, FeeBreakdown, FeeLineItem, Jurisdiction,
    JurisdictionId, SourceCitation,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

/// Inputs shared by every rule for one computation pass.
#[derive(Debug, Clone, Copy)]
pub struct FeeContext<'a> {
    pub scenario: &'a ApplicationScenario,
    pub applicant: ApplicantType,
    /// Date that decides which dated fee schedule applies.
    pub today: NaiveDate,
}

/// Fee schedule for a single jurisdiction.
pub trait GovernmentFeeRule: Send + Sync {
    fn jurisdiction(&self) -> Jurisdiction;

    /// Static citations, attached regardless of scenario.
    fn sources(&self) -> Vec<SourceCitation>;

    fn compute_government_fees(&self, context: &FeeContext<'_>) -> FeeBreakdown;
}

/// Registry mapping each jurisdiction to its rule implementation.
pub struct RuleRegistry {
    rules: BTreeMap<JurisdictionId, Box<dyn GovernmentFeeRule>>,
}

impl RuleRegistry {
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Registry covering every catalogued jurisdiction.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(IndiaRules));
        registry.register(Box::new(EuropeanPatentRules));
        registry.register(Box::new(UnitedStatesRules));
        registry.register(Box::new(UnitedKingdomRules));
        registry.register(Box::new(KoreaRules));
        registry.register(Box::new(JapanRules));
        registry.register(Box::new(ChinaRules));
        registry.register(Box::new(PctRules));
        registry.register(Box::new(AustraliaRules));
        registry
    }

    /// Adds or replaces the rule for the implementation's jurisdiction.
    pub fn register(&mut self, rule: Box<dyn GovernmentFeeRule>) {
        self.rules.insert(rule.jurisdiction().id, rule);
    }

    pub fn contains(&self, id: JurisdictionId) -> bool {
        self.rules.contains_key(&id)
    }

    pub fn compute_government_fees(
        &self,
        jurisdiction: Jurisdiction,
        scenario: &ApplicationScenario,
        applicant: ApplicantType,
        today: NaiveDate,
    ) -> FeeBreakdown {
        let Some(rule) = self.rules.get(&jurisdiction.id) else {
            return FeeBreakdown::unsupported(
                jurisdiction.currency,
                format!("No fee schedule is registered for {}.", jurisdiction.name),
                Vec::new(),
                Vec::new(),
            );
        };

        let context = FeeContext {
            scenario,
            applicant,
            today,
        };
        let breakdown = rule.compute_government_fees(&context);
        debug!(
            jurisdiction = %jurisdiction.id,
            items = breakdown.items().len(),
            unsupported = breakdown.is_unsupported(),
            "computed government fees"
        );
        breakdown
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Accumulates a breakdown; an unsupported route discards any items pushed.
pub(crate) struct BreakdownDraft {
    currency: Currency,
    items: Vec<FeeLineItem>,
    notes: Vec<String>,
    unsupported: Option<String>,
}

impl BreakdownDraft {
    pub(crate) fn new(currency: Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
            notes: Vec::new(),
            unsupported: None,
        }
    }

    pub(crate) fn item(&mut self, label: impl Into<String>, amount: Decimal) {
        self.items.push(FeeLineItem::new(label, amount));
    }

    /// Adds the item only when the amount is strictly positive.
    pub(crate) fn item_if_positive(&mut self, label: impl Into<String>, amount: Decimal) {
        if amount > Decimal::ZERO {
            self.item(label, amount);
        }
    }

    pub(crate) fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub(crate) fn unsupported(&mut self, reason: impl Into<String>) {
        self.unsupported = Some(reason.into());
    }

    pub(crate) fn finish(self, sources: Vec<SourceCitation>) -> FeeBreakdown {
        match self.unsupported {
            Some(reason) => FeeBreakdown::unsupported(self.currency, reason, self.notes, sources),
            None => FeeBreakdown::priced(self.currency, self.items, self.notes, sources),
        }
    }
}

/// Units above a free allowance, e.g. claims over 10.
pub(crate) fn excess_over(count: u32, allowance: u32) -> u32 {
    count.saturating_sub(allowance)
}

/// Surcharge for units above the allowance: `(count - allowance) * per_unit`.
pub(crate) fn surcharge(count: u32, allowance: u32, per_unit: Decimal) -> Decimal {
    Decimal::from(excess_over(count, allowance)) * per_unit
}

/// Whether `today` falls on or after a published schedule change.
pub(crate) fn on_or_after(today: NaiveDate, year: i32, month: u32, day: u32) -> bool {
    NaiveDate::from_ymd_opt(year, month, day).is_some_and(|threshold| today >= threshold)
}

/// Schedule revision announced by both the EPO and UK IPO.
pub(crate) fn april_2026_schedule(today: NaiveDate) -> bool {
    on_or_after(today, 2026, 4, 1)
}

#[cfg(test)]
mod tests;
