//! Donor handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{AdminUser, CurrentUser, ValidatedJson};
use crate::api::AppState;
use crate::domain::{DonorListItem, DonorProfile, Gender};
use crate::errors::AppResult;
use crate::services::{RegisterDonor, UpdateDonorProfile};
use crate::types::{Created, NoContent, PageRequest, Paginated};

/// Donor self-registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDonorRequest {
    /// Donor display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Maria Silva")]
    pub full_name: String,
    /// Donor email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "maria@example.com")]
    pub email: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Date of birth (YYYY-MM-DD)
    #[schema(example = "1990-04-12")]
    pub birth_date: NaiveDate,
    pub gender: Gender,
    /// Contact phone number
    #[validate(length(min = 8, message = "Phone number is too short"))]
    #[schema(example = "+55 11 91234-5678")]
    pub phone: String,
    /// Brazilian taxpayer id
    #[validate(length(min = 11, max = 14, message = "CPF must have 11 digits"))]
    #[schema(example = "123.456.789-09")]
    pub cpf: String,
}

/// Donor profile update request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDonorRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub full_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    #[validate(length(min = 8, message = "Phone number is too short"))]
    pub phone: Option<String>,
}

/// Donor routes; registration is public, listing and deletion are
/// admin-gated through the `AdminUser` guard
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/donors", post(register).get(list_donors))
        .route(
            "/donors/:id",
            get(get_donor).patch(update_donor).delete(delete_donor),
        )
}

/// Register a new donor
#[utoipa::path(
    post,
    path = "/donors",
    tag = "Donors",
    request_body = RegisterDonorRequest,
    responses(
        (status = 201, description = "Donor registered", body = DonorProfile),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterDonorRequest>,
) -> AppResult<Created<DonorProfile>> {
    let profile = state
        .donor_service
        .register(RegisterDonor {
            full_name: payload.full_name,
            email: payload.email,
            password: payload.password,
            birth_date: payload.birth_date,
            gender: payload.gender,
            phone: payload.phone,
            cpf: payload.cpf,
        })
        .await?;

    Ok(Created(profile))
}

/// List donors with their lifetime donated totals
#[utoipa::path(
    get,
    path = "/donors",
    tag = "Donors",
    params(PageRequest),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated donor list"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn list_donors(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<Paginated<DonorListItem>>> {
    let donors = state.donor_service.list(page).await?;
    Ok(Json(donors))
}

/// Fetch one donor profile
#[utoipa::path(
    get,
    path = "/donors/{id}",
    tag = "Donors",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Donor profile", body = DonorProfile),
        (status = 403, description = "Donor requested another donor's profile"),
        (status = 404, description = "Donor not found")
    )
)]
pub async fn get_donor(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DonorProfile>> {
    let profile = state.donor_service.get(id, user.actor()).await?;
    Ok(Json(profile))
}

/// Update a donor profile
#[utoipa::path(
    patch,
    path = "/donors/{id}",
    tag = "Donors",
    request_body = UpdateDonorRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated donor profile", body = DonorProfile),
        (status = 403, description = "Donor updated another donor's profile"),
        (status = 404, description = "Donor not found")
    )
)]
pub async fn update_donor(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateDonorRequest>,
) -> AppResult<Json<DonorProfile>> {
    let profile = state
        .donor_service
        .update(
            id,
            user.actor(),
            UpdateDonorProfile {
                full_name: payload.full_name,
                birth_date: payload.birth_date,
                gender: payload.gender,
                phone: payload.phone,
            },
        )
        .await?;

    Ok(Json(profile))
}

/// Soft delete a donor account
#[utoipa::path(
    delete,
    path = "/donors/{id}",
    tag = "Donors",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Donor deleted"),
        (status = 404, description = "Donor not found")
    )
)]
pub async fn delete_donor(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.donor_service.delete(id).await?;
    Ok(NoContent)
}
