use crate::cli::{EstimateArgs, RatesArgs};
use crate::infra::format_money;
use chrono::Local;
use patent_fees::config::{AppConfig, RatesConfig};
use patent_fees::error::AppError;
use patent_fees::estimates::input::{EpValidationInput, ProfessionalFeeInput};
use patent_fees::estimates::{
    EstimateReport, EstimateRequestBody, EstimateService, FrankfurterProvider, Jurisdiction,
    RateProvider, RateRefresher, RateSnapshot, RateTable, RuleRegistry, SharedRateTable,
};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::Arc;

fn provider(config: &RatesConfig) -> Result<FrankfurterProvider, AppError> {
    Ok(FrankfurterProvider::new(
        config.provider_url.clone(),
        config.timeout,
    )?)
}

pub(crate) async fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let refresher = RateRefresher::new(
        Arc::new(provider(&config.rates)?),
        SharedRateTable::default(),
    );
    let service = EstimateService::new(RuleRegistry::standard(), refresher);

    if args.live {
        let outcome = service.refresh_rates().await;
        if let Some(error) = &outcome.error {
            eprintln!("Rate refresh failed ({error}); using fallback rates.");
        }
    }

    let json = args.json;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let request = request_body(args).into_request()?;
    let report = service.estimate(&request, today);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(body) => println!("{body}"),
            Err(err) => eprintln!("Report serialization failed: {err}"),
        }
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

fn request_body(args: EstimateArgs) -> EstimateRequestBody {
    let ep_validation: BTreeMap<_, _> = args
        .validations
        .into_iter()
        .map(|validation| {
            (
                validation.country,
                EpValidationInput {
                    enabled: true,
                    amount: validation.amount,
                },
            )
        })
        .collect();

    EstimateRequestBody {
        scope: args.scope,
        applicant_type: args.applicant.into(),
        application_type: args.application.into(),
        prior_art: args.search.into(),
        claim_count: args.claims,
        page_count: args.pages,
        pct_efiling_reduction: args.pct_efiling_reduction,
        pct_manual_add_on: args.pct_add_on,
        ep_validation,
        professional_fees: ProfessionalFeeInput::default(),
        today: args.today,
    }
}

pub(crate) fn run_jurisdictions() -> Result<(), AppError> {
    for jurisdiction in Jurisdiction::all() {
        println!(
            "{:<4} {:<28} {}",
            jurisdiction.id, jurisdiction.name, jurisdiction.currency
        );
    }
    Ok(())
}

pub(crate) async fn run_rates(args: RatesArgs) -> Result<(), AppError> {
    let table = if args.live {
        let config = AppConfig::load()?;
        let provider = provider(&config.rates)?;
        let quote = provider.fetch_latest().await?;
        quote.into_rate_table(
            &RateTable::fallback(),
            provider.source_label(),
            chrono::Utc::now(),
        )?
    } else {
        RateTable::fallback()
    };

    print!("{}", render_rates(&RateSnapshot::from(&table)));
    Ok(())
}

pub(crate) fn render_rates(snapshot: &RateSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", snapshot.status);
    for (currency, quote) in &snapshot.quotes {
        if *currency == snapshot.reference {
            continue;
        }
        let _ = writeln!(
            out,
            "- 1 {currency} = {:.4} {}",
            quote.round_dp(4),
            snapshot.reference
        );
    }
    out
}

pub(crate) fn render_report(report: &EstimateReport) -> String {
    let mut out = String::new();
    let reference = report.rates.reference;

    let _ = writeln!(
        out,
        "Patent cost estimate: {} / {} (fee schedules as of {})",
        report.applicant_label, report.application_label, report.evaluated_on
    );
    let _ = writeln!(out, "{}", report.rates.status);

    let priced = report
        .cards
        .iter()
        .filter(|card| card.result.is_available())
        .count();
    let _ = writeln!(out, "\nSummary (lowest total first, {reference})");
    let _ = writeln!(
        out,
        "{priced} of {} jurisdictions priced",
        report.cards.len()
    );
    for row in &report.summary {
        let _ = writeln!(
            out,
            "- {:<28} government {:<20} total {}",
            row.name,
            format_money(row.government_local, row.currency),
            format_money(row.total_reference, reference)
        );
    }

    for card in &report.cards {
        let result = &card.result;
        let local = result.jurisdiction.currency;
        let _ = writeln!(out, "\n{} ({})", result.jurisdiction.name, local);

        match result.government.unsupported_reason() {
            Some(reason) => {
                let _ = writeln!(out, "  Government fees unavailable: {reason}");
            }
            None => {
                let _ = writeln!(out, "  Government fees");
                for item in result.government.items() {
                    let _ = writeln!(
                        out,
                        "  - {}: {}",
                        item.label,
                        format_money(Some(item.amount), local)
                    );
                }
            }
        }

        let _ = writeln!(out, "  Professional fees");
        for item in &result.professional {
            let _ = writeln!(
                out,
                "  - {}: {} ({})",
                item.label,
                format_money(item.amount_local, local),
                format_money(Some(item.amount_reference), reference)
            );
        }

        let _ = writeln!(
            out,
            "  Total: {} | {}",
            format_money(result.total_local, local),
            format_money(result.total_reference, reference)
        );
        let _ = writeln!(out, "  Rate: {}", card.rate_note);
        for note in result.government.notes() {
            let _ = writeln!(out, "  Note: {note}");
        }
        for source in result.government.sources() {
            let _ = writeln!(
                out,
                "  Source: {} <{}> ({})",
                source.label, source.url, source.as_of
            );
        }
    }

    out
}
