//! Donation handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{AdminUser, CurrentUser, ValidatedJson};
use crate::api::AppState;
use crate::domain::{DonationDetails, PaymentMethod, Periodicity};
use crate::errors::AppResult;
use crate::services::CreateDonation;
use crate::types::{Created, PageRequest, Paginated};

/// Donation creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationRequest {
    /// Donated amount in cents
    #[validate(range(min = 1, message = "Amount must be positive"))]
    #[schema(example = 5000)]
    pub amount_cents: i64,
    /// Recurrence cadence; omit for a one-off donation
    pub periodicity: Option<Periodicity>,
    /// Campaign to credit; omit for an unrestricted donation
    pub campaign_id: Option<Uuid>,
    pub payment_method: PaymentMethod,
}

/// Donation routes; the full listing is admin-gated through the
/// `AdminUser` guard
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/donations", post(create_donation).get(list_donations))
        .route("/donations/mine", get(list_my_donations))
        .route("/donations/:id", get(get_donation))
}

/// Create a donation with its pending payment
#[utoipa::path(
    post,
    path = "/donations",
    tag = "Donations",
    request_body = CreateDonationRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Donation created", body = DonationDetails),
        (status = 400, description = "Invalid amount"),
        (status = 404, description = "Unknown campaign or caller has no donor profile")
    )
)]
pub async fn create_donation(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateDonationRequest>,
) -> AppResult<Created<DonationDetails>> {
    let donation = state
        .donation_service
        .create(
            user.actor(),
            CreateDonation {
                amount_cents: payload.amount_cents,
                periodicity: payload.periodicity,
                campaign_id: payload.campaign_id,
                payment_method: payload.payment_method,
            },
        )
        .await?;

    Ok(Created(donation))
}

/// List every donation
#[utoipa::path(
    get,
    path = "/donations",
    tag = "Donations",
    params(PageRequest),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated donation list"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn list_donations(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<Paginated<DonationDetails>>> {
    let donations = state.donation_service.list(page).await?;
    Ok(Json(donations))
}

/// List the calling donor's donations
#[utoipa::path(
    get,
    path = "/donations/mine",
    tag = "Donations",
    params(PageRequest),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated donation list"),
        (status = 404, description = "Caller has no donor profile")
    )
)]
pub async fn list_my_donations(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<Paginated<DonationDetails>>> {
    let donations = state.donation_service.list_mine(user.actor(), page).await?;
    Ok(Json(donations))
}

/// Fetch one donation with its payments
#[utoipa::path(
    get,
    path = "/donations/{id}",
    tag = "Donations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Donation with payments", body = DonationDetails),
        (status = 403, description = "Donor requested another donor's donation"),
        (status = 404, description = "Donation not found")
    )
)]
pub async fn get_donation(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DonationDetails>> {
    let donation = state.donation_service.get(id, user.actor()).await?;
    Ok(Json(donation))
}
