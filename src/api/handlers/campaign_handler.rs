//! Campaign handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, patch},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{AdminUser, ValidatedJson};
use crate::api::AppState;
use crate::domain::{Campaign, CampaignDetails, CampaignStatus};
use crate::errors::AppResult;
use crate::infra::repositories::{CampaignUpdate, NewCampaign};
use crate::types::{Created, NoContent, PageRequest, Paginated};

/// Campaign creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Winter shelter fund")]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    /// Fundraising goal in cents
    #[validate(range(min = 1, message = "Target amount must be positive"))]
    #[schema(example = 5_000_000)]
    pub target_amount_cents: i64,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// Campaign update request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampaignRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Target amount must be positive"))]
    pub target_amount_cents: Option<i64>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// Campaign status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCampaignStatusRequest {
    pub status: CampaignStatus,
}

/// Status filter for campaign listings
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct CampaignListFilter {
    pub status: Option<CampaignStatus>,
}

/// Campaign routes; reads are public, writes are admin-gated through the
/// `AdminUser` guard
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/campaigns", get(list_campaigns).post(create_campaign))
        .route("/campaigns/root", get(root_campaign))
        .route(
            "/campaigns/:id",
            get(get_campaign)
                .patch(update_campaign)
                .delete(delete_campaign),
        )
        .route("/campaigns/:id/status", patch(update_campaign_status))
        .route("/campaigns/:id/root", patch(update_campaign_is_root))
}

/// Create a campaign
#[utoipa::path(
    post,
    path = "/campaigns",
    tag = "Campaigns",
    request_body = CreateCampaignRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Campaign created"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn create_campaign(
    State(state): State<AppState>,
    AdminUser(user): AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateCampaignRequest>,
) -> AppResult<Created<Campaign>> {
    let campaign = state
        .campaign_service
        .create(NewCampaign {
            title: payload.title,
            description: payload.description,
            target_amount_cents: payload.target_amount_cents,
            starts_at: payload.starts_at,
            ends_at: payload.ends_at,
            created_by: user.id,
        })
        .await?;

    Ok(Created(campaign))
}

/// List campaigns
#[utoipa::path(
    get,
    path = "/campaigns",
    tag = "Campaigns",
    params(PageRequest, CampaignListFilter),
    responses(
        (status = 200, description = "Paginated campaign list")
    )
)]
pub async fn list_campaigns(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
    Query(filter): Query<CampaignListFilter>,
) -> AppResult<Json<Paginated<CampaignDetails>>> {
    let campaigns = state.campaign_service.list(page, filter.status).await?;
    Ok(Json(campaigns))
}

/// Fetch the campaign flagged for default display
#[utoipa::path(
    get,
    path = "/campaigns/root",
    tag = "Campaigns",
    responses(
        (status = 200, description = "Current root campaign, or null")
    )
)]
pub async fn root_campaign(
    State(state): State<AppState>,
) -> AppResult<Json<Option<Campaign>>> {
    let campaign = state.campaign_service.root_campaign().await?;
    Ok(Json(campaign))
}

/// Fetch one campaign
#[utoipa::path(
    get,
    path = "/campaigns/{id}",
    tag = "Campaigns",
    responses(
        (status = 200, description = "Campaign with creator name", body = CampaignDetails),
        (status = 404, description = "Campaign not found")
    )
)]
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CampaignDetails>> {
    let campaign = state.campaign_service.get(id).await?;
    Ok(Json(campaign))
}

/// Update a campaign
#[utoipa::path(
    patch,
    path = "/campaigns/{id}",
    tag = "Campaigns",
    request_body = UpdateCampaignRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated campaign"),
        (status = 404, description = "Campaign not found")
    )
)]
pub async fn update_campaign(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateCampaignRequest>,
) -> AppResult<Json<Campaign>> {
    let campaign = state
        .campaign_service
        .update(
            id,
            CampaignUpdate {
                title: payload.title,
                description: payload.description,
                target_amount_cents: payload.target_amount_cents,
                starts_at: payload.starts_at,
                ends_at: payload.ends_at,
            },
        )
        .await?;

    Ok(Json(campaign))
}

/// Change a campaign's status
#[utoipa::path(
    patch,
    path = "/campaigns/{id}/status",
    tag = "Campaigns",
    request_body = UpdateCampaignStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Campaign with new status"),
        (status = 404, description = "Campaign not found")
    )
)]
pub async fn update_campaign_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCampaignStatusRequest>,
) -> AppResult<Json<Campaign>> {
    let campaign = state.campaign_service.set_status(id, payload.status).await?;
    Ok(Json(campaign))
}

/// Flag a campaign as the root campaign
#[utoipa::path(
    patch,
    path = "/campaigns/{id}/root",
    tag = "Campaigns",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Campaign now holding the root flag"),
        (status = 404, description = "Campaign not found")
    )
)]
pub async fn update_campaign_is_root(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Campaign>> {
    let campaign = state.campaign_service.set_root(id).await?;
    Ok(Json(campaign))
}

/// Delete a campaign
#[utoipa::path(
    delete,
    path = "/campaigns/{id}",
    tag = "Campaigns",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Campaign deleted"),
        (status = 404, description = "Campaign not found")
    )
)]
pub async fn delete_campaign(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.campaign_service.delete(id).await?;
    Ok(NoContent)
}
