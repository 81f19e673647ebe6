use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::Serialize;

use super::currency::{RateProvider, RefreshOutcome};
use super::domain::Jurisdiction;
use super::input::EstimateRequestBody;
use super::service::{EstimateReport, EstimateService, RateSnapshot};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub refresh: RefreshOutcome,
    pub rates: RateSnapshot,
}

/// Router exposing estimates, the jurisdiction catalogue and rate controls.
pub fn estimate_router<P>(service: Arc<EstimateService<P>>) -> Router
where
    P: RateProvider + 'static,
{
    Router::new()
        .route("/api/v1/estimates", post(estimate_handler::<P>))
        .route("/api/v1/jurisdictions", get(jurisdictions_handler))
        .route("/api/v1/rates", get(rates_handler::<P>))
        .route("/api/v1/rates/refresh", post(refresh_handler::<P>))
        .with_state(service)
}

pub(crate) async fn estimate_handler<P>(
    State(service): State<Arc<EstimateService<P>>>,
    Json(body): Json<EstimateRequestBody>,
) -> Result<Json<EstimateReport>, AppError>
where
    P: RateProvider + 'static,
{
    let today = body.today.unwrap_or_else(|| Local::now().date_naive());
    let request = body.into_request()?;
    Ok(Json(service.estimate(&request, today)))
}

pub(crate) async fn jurisdictions_handler() -> Json<Vec<Jurisdiction>> {
    Json(Jurisdiction::all())
}

pub(crate) async fn rates_handler<P>(
    State(service): State<Arc<EstimateService<P>>>,
) -> Json<RateSnapshot>
where
    P: RateProvider + 'static,
{
    Json(service.rates())
}

pub(crate) async fn refresh_handler<P>(
    State(service): State<Arc<EstimateService<P>>>,
) -> Json<RefreshResponse>
where
    P: RateProvider + 'static,
{
    let refresh = service.refresh_rates().await;
    Json(RefreshResponse {
        refresh,
        rates: service.rates(),
    })
}
