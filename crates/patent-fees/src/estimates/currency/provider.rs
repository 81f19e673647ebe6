use super::super::domain::Currency;
use super::{RateMetadata, RateTable};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Rates as published by a provider: units of each currency per one anchor unit.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorQuote {
    pub anchor: Currency,
    pub as_of: Option<String>,
    pub rates: BTreeMap<Currency, Decimal>,
}

impl AnchorQuote {
    /// Re-expresses the quote against `previous`'s reference currency.
    ///
    /// The anchor-to-reference rate must be present; currencies the provider left out
    /// keep the values held in `previous`.
    pub fn into_rate_table(
        self,
        previous: &RateTable,
        source: &str,
        fetched_at: DateTime<Utc>,
    ) -> Result<RateTable, RateFetchError> {
        let reference = previous.reference();
        let anchor_to_reference = if self.anchor == reference {
            Decimal::ONE
        } else {
            self.rates
                .get(&reference)
                .copied()
                .filter(|rate| *rate > Decimal::ZERO)
                .ok_or(RateFetchError::MissingReference(reference))?
        };

        let mut updates = BTreeMap::new();
        if self.anchor != reference {
            if let Some(rate) = Decimal::ONE.checked_div(anchor_to_reference) {
                updates.insert(self.anchor, rate);
            }
        }
        for (currency, anchor_to_currency) in &self.rates {
            if *currency == reference || *anchor_to_currency <= Decimal::ZERO {
                continue;
            }
            if let Some(rate) = anchor_to_currency.checked_div(anchor_to_reference) {
                updates.insert(*currency, rate);
            }
        }

        Ok(previous.merged(
            updates,
            RateMetadata {
                source: source.to_string(),
                as_of: self.as_of,
                fetched_at: Some(fetched_at),
                fallback: false,
            },
        ))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RateFetchError {
    #[error("rate provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("rate provider responded with HTTP {0}")]
    Status(u16),
    #[error("rate provider returned malformed data: {0}")]
    Malformed(String),
    #[error("{0} rate missing in provider response")]
    MissingReference(Currency),
}

/// External exchange-rate source.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Label recorded in rate metadata after a successful fetch.
    fn source_label(&self) -> &str;

    async fn fetch_latest(&self) -> Result<AnchorQuote, RateFetchError>;
}

#[derive(Debug, Deserialize)]
struct FrankfurterResponse {
    #[serde(default)]
    date: Option<String>,
    rates: HashMap<String, f64>,
}

/// Frankfurter (ECB reference rates), anchored on EUR.
pub struct FrankfurterProvider {
    client: Client,
    base_url: String,
}

impl FrankfurterProvider {
    pub const ANCHOR: Currency = Currency::Eur;

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RateFetchError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn targets() -> String {
        Currency::all()
            .into_iter()
            .filter(|currency| *currency != Self::ANCHOR)
            .map(Currency::code)
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[async_trait]
impl RateProvider for FrankfurterProvider {
    fn source_label(&self) -> &str {
        "Frankfurter / ECB"
    }

    async fn fetch_latest(&self) -> Result<AnchorQuote, RateFetchError> {
        let url = format!("{}/latest", self.base_url);
        let targets = Self::targets();
        let response = self
            .client
            .get(&url)
            .query(&[("from", Self::ANCHOR.code()), ("to", targets.as_str())])
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RateFetchError::Status(response.status().as_u16()));
        }

        let body: FrankfurterResponse = response
            .json()
            .await
            .map_err(|err| RateFetchError::Malformed(err.to_string()))?;

        let rates = body
            .rates
            .into_iter()
            .filter_map(|(code, rate)| {
                let currency = code.parse::<Currency>().ok()?;
                let rate = Decimal::from_f64(rate)?;
                Some((currency, rate))
            })
            .collect();

        Ok(AnchorQuote {
            anchor: Self::ANCHOR,
            as_of: body.date,
            rates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(rates: &[(Currency, Decimal)]) -> AnchorQuote {
        AnchorQuote {
            anchor: Currency::Eur,
            as_of: Some("2026-10-16".to_string()),
            rates: rates.iter().copied().collect(),
        }
    }

    #[test]
    fn provider_trims_trailing_slash_from_base_url() {
        let provider = FrankfurterProvider::new("https://rates.example/", Duration::from_secs(1))
            .expect("client builds");
        assert_eq!(provider.base_url, "https://rates.example");
    }

    #[test]
    fn anchor_rates_are_rebased_on_reference() {
        let previous = RateTable::fallback();
        let table = quote(&[(Currency::Inr, dec!(100)), (Currency::Usd, dec!(1.25))])
            .into_rate_table(&previous, "Frankfurter / ECB", Utc::now())
            .expect("reference present");

        assert_eq!(table.rate(Currency::Eur), Some(dec!(0.01)));
        assert_eq!(table.rate(Currency::Usd), Some(dec!(0.0125)));
        assert_eq!(table.rate(Currency::Inr), Some(Decimal::ONE));
        assert_eq!(table.rate(Currency::Jpy), previous.rate(Currency::Jpy));
        assert_eq!(table.metadata().as_of.as_deref(), Some("2026-10-16"));
        assert!(!table.metadata().fallback);
    }

    #[test]
    fn quote_without_reference_is_incomplete() {
        let previous = RateTable::fallback();
        let err = quote(&[(Currency::Usd, dec!(1.1))])
            .into_rate_table(&previous, "Frankfurter / ECB", Utc::now())
            .expect_err("reference missing");

        assert!(matches!(err, RateFetchError::MissingReference(Currency::Inr)));
    }

    #[test]
    fn targets_exclude_anchor() {
        let targets = FrankfurterProvider::targets();
        assert!(!targets.contains("EUR"));
        assert!(targets.contains("INR"));
        assert_eq!(targets.split(',').count(), 8);
    }
}
