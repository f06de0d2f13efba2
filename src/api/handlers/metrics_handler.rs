//! Dashboard metrics handlers. All routes are admin-gated.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::AdminUser;
use crate::api::AppState;
use crate::domain::{DonorDistribution, MethodTotal, PeriodBucket, PeriodPoint, SummaryTotals};
use crate::errors::AppResult;

/// Rolling-window selector
#[derive(Debug, Deserialize, IntoParams)]
pub struct SummaryQuery {
    /// Window size in days (30 by default; the dashboard also uses 365)
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    30
}

/// Date range selector
#[derive(Debug, Deserialize, IntoParams)]
pub struct RangeQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Date range plus bucket width selector
#[derive(Debug, Deserialize, IntoParams)]
pub struct PeriodQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub bucket: PeriodBucket,
}

/// Admin-only metrics routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/metrics/summary", get(summary))
        .route("/metrics/donors/distribution", get(donor_distribution))
        .route(
            "/metrics/donations/by-payment-method",
            get(totals_by_payment_method),
        )
        .route("/metrics/donations/by-period", get(raised_by_period))
}

/// Rolling-window dashboard totals
#[utoipa::path(
    get,
    path = "/metrics/summary",
    tag = "Metrics",
    params(SummaryQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Window totals", body = SummaryTotals),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn summary(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<SummaryTotals>> {
    let totals = state.metrics_service.summary(query.days).await?;
    Ok(Json(totals))
}

/// Donor gender and age distribution
#[utoipa::path(
    get,
    path = "/metrics/donors/distribution",
    tag = "Metrics",
    params(RangeQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Distribution buckets", body = DonorDistribution)
    )
)]
pub async fn donor_distribution(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<DonorDistribution>> {
    let distribution = state
        .metrics_service
        .donor_distribution(query.from, query.to)
        .await?;

    Ok(Json(distribution))
}

/// Donation totals grouped by payment method
#[utoipa::path(
    get,
    path = "/metrics/donations/by-payment-method",
    tag = "Metrics",
    params(RangeQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Totals per method", body = [MethodTotal])
    )
)]
pub async fn totals_by_payment_method(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<MethodTotal>>> {
    let totals = state
        .metrics_service
        .totals_by_payment_method(query.from, query.to)
        .await?;

    Ok(Json(totals))
}

/// Amount raised per daily/weekly/monthly bucket
#[utoipa::path(
    get,
    path = "/metrics/donations/by-period",
    tag = "Metrics",
    params(PeriodQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Raised series", body = [PeriodPoint])
    )
)]
pub async fn raised_by_period(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<Vec<PeriodPoint>>> {
    let points = state
        .metrics_service
        .raised_by_period(query.from, query.to, query.bucket)
        .await?;

    Ok(Json(points))
}
