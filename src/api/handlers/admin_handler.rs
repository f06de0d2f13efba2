//! Admin account handlers. All routes are admin-gated.

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

use crate::api::extractors::{AdminUser, ValidatedJson};
use crate::api::AppState;
use crate::domain::AdminProfile;
use crate::errors::AppResult;
use crate::services::CreateAdmin;
use crate::types::{Created, NoContent, PageRequest, Paginated};

/// Admin creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    /// Admin display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Ana Souza")]
    pub full_name: String,
    /// Admin email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ana@example.com")]
    pub email: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
}

/// Admin rename request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminRequest {
    /// New display name
    #[validate(length(min = 1, message = "Name is required"))]
    pub full_name: String,
}

/// Admin-only account management routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin", post(create_admin).get(list_admins))
        .route(
            "/admin/:id",
            get(get_admin).patch(update_admin).delete(delete_admin),
        )
}

/// Create an administrator
#[utoipa::path(
    post,
    path = "/admin",
    tag = "Admins",
    request_body = CreateAdminRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Admin created", body = AdminProfile),
        (status = 403, description = "Caller is not an admin"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_admin(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateAdminRequest>,
) -> AppResult<Created<AdminProfile>> {
    let profile = state
        .admin_service
        .create(CreateAdmin {
            full_name: payload.full_name,
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok(Created(profile))
}

/// List administrators
#[utoipa::path(
    get,
    path = "/admin",
    tag = "Admins",
    params(PageRequest),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Paginated admin list"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn list_admins(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<Paginated<AdminProfile>>> {
    let admins = state.admin_service.list(page).await?;
    Ok(Json(admins))
}

/// Fetch one administrator
#[utoipa::path(
    get,
    path = "/admin/{id}",
    tag = "Admins",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Admin profile", body = AdminProfile),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn get_admin(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AdminProfile>> {
    let profile = state.admin_service.get(id).await?;
    Ok(Json(profile))
}

/// Rename an administrator
#[utoipa::path(
    patch,
    path = "/admin/{id}",
    tag = "Admins",
    request_body = UpdateAdminRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated admin profile", body = AdminProfile),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn update_admin(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateAdminRequest>,
) -> AppResult<Json<AdminProfile>> {
    let profile = state
        .admin_service
        .update_name(id, payload.full_name)
        .await?;

    Ok(Json(profile))
}

/// Soft delete an administrator account
#[utoipa::path(
    delete,
    path = "/admin/{id}",
    tag = "Admins",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Admin deleted"),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn delete_admin(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.admin_service.delete(id).await?;
    Ok(NoContent)
}
