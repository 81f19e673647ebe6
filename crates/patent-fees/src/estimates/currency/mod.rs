//! Reference-currency normalization and the process-wide rate table.
//!
//! Rates are quoted as units of a currency per one unit of the reference currency.
//! Conversions never guess: a missing or non-positive rate yields `None`.

mod provider;
mod refresh;

pub use provider::{AnchorQuote, FrankfurterProvider, RateFetchError, RateProvider};
pub use refresh::{RateRefresher, RefreshOutcome};

use super::domain::Currency;
use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Common currency every cross-jurisdiction comparison is expressed in.
pub const REFERENCE_CURRENCY: Currency = Currency::Inr;

/// Provenance of the rates currently held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateMetadata {
    pub source: String,
    pub as_of: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub fallback: bool,
}

impl RateMetadata {
    pub fn status_line(&self) -> String {
        if self.fallback {
            return "Using fallback rates (last refresh failed).".to_string();
        }
        match &self.as_of {
            Some(date) => format!("Live rates loaded from {} ({date}).", self.source),
            None => format!("Live rates loaded from {}.", self.source),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateTable {
    reference: Currency,
    rates: BTreeMap<Currency, Decimal>,
    metadata: RateMetadata,
}

impl RateTable {
    pub fn new(
        reference: Currency,
        rates: BTreeMap<Currency, Decimal>,
        metadata: RateMetadata,
    ) -> Self {
        let mut rates = rates;
        rates.insert(reference, Decimal::ONE);
        Self {
            reference,
            rates,
            metadata,
        }
    }

    /// Static table used before the first refresh and whenever a refresh fails.
    pub fn fallback() -> Self {
        Self::fallback_at(None)
    }

    pub(crate) fn fallback_at(fetched_at: Option<DateTime<Utc>>) -> Self {
        let rates = fallback_reference_per_unit()
            .into_iter()
            .filter(|(_, reference_per_unit)| *reference_per_unit > Decimal::ZERO)
            .map(|(currency, reference_per_unit)| (currency, Decimal::ONE / reference_per_unit))
            .collect();

        Self::new(
            REFERENCE_CURRENCY,
            rates,
            RateMetadata {
                source: "Fallback static set".to_string(),
                as_of: None,
                fetched_at,
                fallback: true,
            },
        )
    }

    pub fn reference(&self) -> Currency {
        self.reference
    }

    pub fn metadata(&self) -> &RateMetadata {
        &self.metadata
    }

    /// Units of `currency` per reference unit, only when strictly positive.
    pub fn rate(&self, currency: Currency) -> Option<Decimal> {
        self.rates
            .get(&currency)
            .copied()
            .filter(|rate| *rate > Decimal::ZERO)
    }

    /// Reference units per one unit of `currency`, as quoted in rate notes.
    pub fn reference_per_unit(&self, currency: Currency) -> Option<Decimal> {
        if currency == self.reference {
            return Some(Decimal::ONE);
        }
        self.rate(currency).and_then(|rate| Decimal::ONE.checked_div(rate))
    }

    /// Applies freshly fetched rates; currencies absent from `updates` keep their values.
    pub fn merged(&self, updates: BTreeMap<Currency, Decimal>, metadata: RateMetadata) -> Self {
        let mut rates = self.rates.clone();
        rates.extend(
            updates
                .into_iter()
                .filter(|(_, rate)| *rate > Decimal::ZERO),
        );
        Self::new(self.reference, rates, metadata)
    }

    pub fn normalizer(&self) -> CurrencyNormalizer<'_> {
        CurrencyNormalizer { rates: self }
    }

    /// Human readable rate line for a jurisdiction card.
    pub fn rate_note(&self, currency: Currency) -> String {
        if currency == self.reference {
            return format!("Base currency is {}.", self.reference);
        }
        match self.reference_per_unit(currency) {
            Some(quote) => {
                let provenance = match &self.metadata.as_of {
                    Some(date) => format!("{}, {date}", self.metadata.source),
                    None => self.metadata.source.clone(),
                };
                format!(
                    "1 {currency} = {:.4} {} ({provenance})",
                    quote.round_dp(4),
                    self.reference
                )
            }
            None => format!("{} conversion unavailable for this currency.", self.reference),
        }
    }
}

fn fallback_reference_per_unit() -> [(Currency, Decimal); 9] {
    [
        (Currency::Inr, Decimal::ONE),
        (Currency::Usd, dec!(83.2)),
        (Currency::Eur, dec!(90.8)),
        (Currency::Gbp, dec!(106.3)),
        (Currency::Krw, dec!(0.062)),
        (Currency::Jpy, dec!(0.56)),
        (Currency::Cny, dec!(11.6)),
        (Currency::Aud, dec!(54.6)),
        (Currency::Chf, dec!(95.1)),
    ]
}

/// Stateless converter between local currencies and the reference currency.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyNormalizer<'a> {
    rates: &'a RateTable,
}

impl<'a> CurrencyNormalizer<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    pub fn reference(&self) -> Currency {
        self.rates.reference
    }

    pub fn to_reference(&self, amount: Decimal, from: Currency) -> Option<Decimal> {
        if from == self.rates.reference {
            return Some(amount);
        }
        self.rates
            .rate(from)
            .and_then(|rate| amount.checked_div(rate))
    }

    pub fn from_reference(&self, amount: Decimal, to: Currency) -> Option<Decimal> {
        if to == self.rates.reference {
            return Some(amount);
        }
        self.rates
            .rate(to)
            .and_then(|rate| amount.checked_mul(rate))
    }
}

/// Single-owner cell holding the current rate table; replaced atomically on refresh.
#[derive(Clone)]
pub struct SharedRateTable {
    inner: Arc<ArcSwap<RateTable>>,
}

impl SharedRateTable {
    pub fn new(table: RateTable) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(table)),
        }
    }

    /// Snapshot used for one full computation pass.
    pub fn snapshot(&self) -> Arc<RateTable> {
        self.inner.load_full()
    }

    pub fn replace(&self, table: RateTable) {
        self.inner.store(Arc::new(table));
    }
}

impl Default for SharedRateTable {
    fn default() -> Self {
        Self::new(RateTable::fallback())
    }
}
