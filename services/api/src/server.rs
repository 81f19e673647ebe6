use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_estimate_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use patent_fees::config::AppConfig;
use patent_fees::error::AppError;
use patent_fees::estimates::{
    EstimateService, FrankfurterProvider, RateRefresher, RuleRegistry, SharedRateTable,
};
use patent_fees::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let provider = Arc::new(FrankfurterProvider::new(
        config.rates.provider_url.clone(),
        config.rates.timeout,
    )?);
    let refresher = RateRefresher::new(provider, SharedRateTable::default());

    if args.offline {
        info!("offline mode: serving fallback exchange rates");
    } else {
        // Estimates are served from fallback rates until this lands.
        let startup = refresher.clone();
        tokio::spawn(async move {
            startup.refresh().await;
        });
        if let Some(every) = config.rates.refresh_interval {
            refresher.spawn_periodic(every);
            info!(interval_secs = every.as_secs(), "periodic rate refresh scheduled");
        }
    }

    let estimate_service = Arc::new(EstimateService::new(RuleRegistry::standard(), refresher));

    let app = with_estimate_routes(estimate_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        rates_provider = %config.rates.provider_url,
        "patent fee estimator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
