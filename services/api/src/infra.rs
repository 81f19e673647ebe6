use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use patent_fees::estimates::{Currency, EpValidationCountry};
use rust_decimal::Decimal;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// One `--validate COUNTRY=AMOUNT` flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ValidationArg {
    pub(crate) country: EpValidationCountry,
    pub(crate) amount: f64,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_validation(raw: &str) -> Result<ValidationArg, String> {
    let (country, amount) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected COUNTRY=AMOUNT, got '{raw}'"))?;
    let country = country
        .parse::<EpValidationCountry>()
        .map_err(|err| err.to_string())?;
    let amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid amount in '{raw}' ({err})"))?;
    Ok(ValidationArg { country, amount })
}

/// `None` renders as "Unavailable" so a missing figure never reads as zero.
pub(crate) fn format_money(amount: Option<Decimal>, currency: Currency) -> String {
    match amount {
        Some(amount) => {
            let decimals = currency.display_decimals();
            format!(
                "{} {:.*}",
                currency,
                decimals as usize,
                amount.round_dp(decimals)
            )
        }
        None => "Unavailable".to_string(),
    }
}
