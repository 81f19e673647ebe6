use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Currencies used by at least one jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Inr,
    Eur,
    Usd,
    Gbp,
    Krw,
    Jpy,
    Cny,
    Aud,
    Chf,
}

impl Currency {
    pub const fn all() -> [Self; 9] {
        [
            Self::Inr,
            Self::Eur,
            Self::Usd,
            Self::Gbp,
            Self::Krw,
            Self::Jpy,
            Self::Cny,
            Self::Aud,
            Self::Chf,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Inr => "INR",
            Self::Eur => "EUR",
            Self::Usd => "USD",
            Self::Gbp => "GBP",
            Self::Krw => "KRW",
            Self::Jpy => "JPY",
            Self::Cny => "CNY",
            Self::Aud => "AUD",
            Self::Chf => "CHF",
        }
    }

    /// Minor-unit digits used when presenting amounts.
    pub const fn display_decimals(self) -> u32 {
        match self {
            Self::Jpy | Self::Krw => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = UnknownCode;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let code = raw.trim().to_ascii_uppercase();
        Self::all()
            .into_iter()
            .find(|currency| currency.code() == code)
            .ok_or_else(|| UnknownCode(raw.to_string()))
    }
}

/// Raised when a currency or jurisdiction code is not part of the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown code '{0}'")]
pub struct UnknownCode(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JurisdictionId {
    In,
    Ep,
    Us,
    Uk,
    Kr,
    Jp,
    Cn,
    Pct,
    Au,
}

impl JurisdictionId {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::In,
            Self::Ep,
            Self::Us,
            Self::Uk,
            Self::Kr,
            Self::Jp,
            Self::Cn,
            Self::Pct,
            Self::Au,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Ep => "EP",
            Self::Us => "US",
            Self::Uk => "UK",
            Self::Kr => "KR",
            Self::Jp => "JP",
            Self::Cn => "CN",
            Self::Pct => "PCT",
            Self::Au => "AU",
        }
    }

    pub const fn jurisdiction(self) -> Jurisdiction {
        match self {
            Self::In => Jurisdiction::new(self, "India", Currency::Inr),
            Self::Ep => Jurisdiction::new(self, "EP (European Patent Office)", Currency::Eur),
            Self::Us => Jurisdiction::new(self, "United States", Currency::Usd),
            Self::Uk => Jurisdiction::new(self, "United Kingdom", Currency::Gbp),
            Self::Kr => Jurisdiction::new(self, "Korea", Currency::Krw),
            Self::Jp => Jurisdiction::new(self, "Japan", Currency::Jpy),
            Self::Cn => Jurisdiction::new(self, "China", Currency::Cny),
            Self::Pct => Jurisdiction::new(self, "PCT / International", Currency::Chf),
            Self::Au => Jurisdiction::new(self, "Australia", Currency::Aud),
        }
    }
}

impl fmt::Display for JurisdictionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for JurisdictionId {
    type Err = UnknownCode;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let code = raw.trim().to_ascii_uppercase();
        Self::ordered()
            .into_iter()
            .find(|id| id.code() == code)
            .ok_or_else(|| UnknownCode(raw.to_string()))
    }
}

/// A patent office or treaty body with its own fee schedule and currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Jurisdiction {
    pub id: JurisdictionId,
    pub name: &'static str,
    pub currency: Currency,
}

impl Jurisdiction {
    const fn new(id: JurisdictionId, name: &'static str, currency: Currency) -> Self {
        Self { id, name, currency }
    }

    /// Every supported jurisdiction in display order.
    pub fn all() -> Vec<Jurisdiction> {
        JurisdictionId::ordered()
            .into_iter()
            .map(JurisdictionId::jurisdiction)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantType {
    Startup,
    Individual,
    Sme,
    Company,
}

impl ApplicantType {
    /// Pricing factor applied to professional fees.
    pub fn multiplier(self) -> Decimal {
        match self {
            Self::Startup => dec!(0.9),
            Self::Individual => dec!(0.95),
            Self::Sme => Decimal::ONE,
            Self::Company => dec!(1.1),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Startup => "Start-up",
            Self::Individual => "Individual",
            Self::Sme => "SME",
            Self::Company => "Company",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationType {
    Provisional,
    Complete,
    Foreign,
    Pct,
}

impl ApplicationType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Provisional => "Provisional Drafting",
            Self::Complete => "Complete Drafting & Filing",
            Self::Foreign => "Foreign Filing (Direct/National)",
            Self::Pct => "PCT Filing (International / Follow-on)",
        }
    }

    /// PCT filings and foreign follow-on filings reach regional validation.
    pub const fn reaches_validation(self) -> bool {
        matches!(self, Self::Pct | Self::Foreign)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorArtSearch {
    #[default]
    None,
    Quick,
    Extensive,
}

/// EPC member states offered for post-grant validation estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpValidationCountry {
    Fr,
    De,
    It,
    Es,
    Nl,
    Gb,
    Ch,
}

impl EpValidationCountry {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Fr,
            Self::De,
            Self::It,
            Self::Es,
            Self::Nl,
            Self::Gb,
            Self::Ch,
        ]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Fr => "France",
            Self::De => "Germany",
            Self::It => "Italy",
            Self::Es => "Spain",
            Self::Nl => "Netherlands",
            Self::Gb => "United Kingdom",
            Self::Ch => "Switzerland",
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::De => "de",
            Self::It => "it",
            Self::Es => "es",
            Self::Nl => "nl",
            Self::Gb => "gb",
            Self::Ch => "ch",
        }
    }
}

impl FromStr for EpValidationCountry {
    type Err = UnknownCode;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let code = raw.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|country| country.code() == code)
            .ok_or_else(|| UnknownCode(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EpValidationEntry {
    pub enabled: bool,
    /// User estimate in EUR.
    pub amount: Decimal,
}

/// Caller-supplied facts about the filing, re-read in full on every estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationScenario {
    pub application_type: ApplicationType,
    #[serde(default)]
    pub prior_art: PriorArtSearch,
    pub claim_count: u32,
    pub page_count: u32,
    #[serde(default)]
    pub pct_efiling_reduction: Decimal,
    #[serde(default)]
    pub pct_manual_add_on: Decimal,
    #[serde(default)]
    pub ep_validation: BTreeMap<EpValidationCountry, EpValidationEntry>,
}

impl ApplicationScenario {
    pub fn new(application_type: ApplicationType) -> Self {
        Self {
            application_type,
            prior_art: PriorArtSearch::None,
            claim_count: 10,
            page_count: 30,
            pct_efiling_reduction: Decimal::ZERO,
            pct_manual_add_on: Decimal::ZERO,
            ep_validation: BTreeMap::new(),
        }
    }

    /// Clamps every field to its floor so nothing below range reaches the rules.
    pub fn sanitized(mut self) -> Self {
        self.claim_count = self.claim_count.max(1);
        self.page_count = self.page_count.max(1);
        self.pct_efiling_reduction = clamp_amount(self.pct_efiling_reduction);
        self.pct_manual_add_on = clamp_amount(self.pct_manual_add_on);
        for entry in self.ep_validation.values_mut() {
            entry.amount = clamp_amount(entry.amount);
        }
        self
    }
}

/// Professional base fees in the reference currency, editable by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalFeeSchedule {
    pub quick_search: Decimal,
    pub extensive_search: Decimal,
    pub provisional: Decimal,
    pub complete: Decimal,
    pub foreign: Decimal,
    pub pct: Decimal,
}

impl Default for ProfessionalFeeSchedule {
    fn default() -> Self {
        Self {
            quick_search: dec!(12000),
            extensive_search: dec!(22000),
            provisional: dec!(30000),
            complete: dec!(70000),
            foreign: dec!(50000),
            pct: dec!(65000),
        }
    }
}

impl ProfessionalFeeSchedule {
    pub fn sanitized(self) -> Self {
        Self {
            quick_search: clamp_amount(self.quick_search),
            extensive_search: clamp_amount(self.extensive_search),
            provisional: clamp_amount(self.provisional),
            complete: clamp_amount(self.complete),
            foreign: clamp_amount(self.foreign),
            pct: clamp_amount(self.pct),
        }
    }
}

/// Upper bound on user-entered monetary inputs; keeps sums clear of decimal overflow.
pub const MAX_MONETARY_INPUT: Decimal = dec!(1000000000000);

fn clamp_amount(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO).min(MAX_MONETARY_INPUT)
}

/// Coerces a raw count to an integer no lower than 1; non-finite input falls to the floor.
pub fn coerce_count(raw: f64) -> u32 {
    if !raw.is_finite() || raw < 1.0 {
        return 1;
    }
    if raw >= f64::from(u32::MAX) {
        return u32::MAX;
    }
    raw.trunc() as u32
}

/// Coerces a raw monetary input to a non-negative decimal; non-finite input becomes zero.
pub fn coerce_amount(raw: f64) -> Decimal {
    if !raw.is_finite() || raw <= 0.0 {
        return Decimal::ZERO;
    }
    Decimal::from_f64(raw)
        .map(clamp_amount)
        .unwrap_or(MAX_MONETARY_INPUT)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeLineItem {
    pub label: String,
    pub amount: Decimal,
}

impl FeeLineItem {
    pub fn new(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Published fee table backing a jurisdiction's figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCitation {
    pub label: &'static str,
    pub url: &'static str,
    pub as_of: &'static str,
}

/// Government fee itemization in the jurisdiction's local currency.
///
/// A breakdown with an unsupported reason never carries items, so it can never be
/// mistaken for a zero-cost route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeBreakdown {
    currency: Currency,
    items: Vec<FeeLineItem>,
    notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unsupported_reason: Option<String>,
    sources: Vec<SourceCitation>,
}

impl FeeBreakdown {
    pub fn priced(
        currency: Currency,
        items: Vec<FeeLineItem>,
        notes: Vec<String>,
        sources: Vec<SourceCitation>,
    ) -> Self {
        Self {
            currency,
            items,
            notes,
            unsupported_reason: None,
            sources,
        }
    }

    pub fn unsupported(
        currency: Currency,
        reason: impl Into<String>,
        notes: Vec<String>,
        sources: Vec<SourceCitation>,
    ) -> Self {
        Self {
            currency,
            items: Vec::new(),
            notes,
            unsupported_reason: Some(reason.into()),
            sources,
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn items(&self) -> &[FeeLineItem] {
        &self.items
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn unsupported_reason(&self) -> Option<&str> {
        self.unsupported_reason.as_deref()
    }

    pub fn is_unsupported(&self) -> bool {
        self.unsupported_reason.is_some()
    }

    pub fn sources(&self) -> &[SourceCitation] {
        &self.sources
    }

    #[cfg(test)]
    pub(crate) fn item(&self, label_prefix: &str) -> Option<&FeeLineItem> {
        self.items
            .iter()
            .find(|item| item.label.starts_with(label_prefix))
    }

    /// Sum of all items, or `None` when the route is unsupported.
    pub fn total(&self) -> Option<Decimal> {
        if self.is_unsupported() {
            return None;
        }
        Some(self.items.iter().map(|item| item.amount).sum())
    }
}
