//! How-to-help handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{AdminUser, ValidatedJson};
use crate::api::AppState;
use crate::domain::HowToHelp;
use crate::errors::AppResult;
use crate::infra::repositories::{HowToHelpUpdate, NewHowToHelp};
use crate::types::{Created, NoContent, PageRequest, Paginated};

/// How-to-help creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateHowToHelpRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Volunteer with us")]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(url(message = "Invalid URL"))]
    pub url: Option<String>,
}

/// How-to-help update request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateHowToHelpRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    #[validate(url(message = "Invalid URL"))]
    pub url: Option<String>,
}

/// How-to-help routes; reads are public, writes are admin-gated through
/// the `AdminUser` guard
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/how-to-help", get(list_entries).post(create_entry))
        .route(
            "/how-to-help/:id",
            get(get_entry).patch(update_entry).delete(delete_entry),
        )
}

/// Create a how-to-help entry
#[utoipa::path(
    post,
    path = "/how-to-help",
    tag = "HowToHelp",
    request_body = CreateHowToHelpRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Entry created", body = HowToHelp),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn create_entry(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateHowToHelpRequest>,
) -> AppResult<Created<HowToHelp>> {
    let entry = state
        .how_to_help_service
        .create(NewHowToHelp {
            title: payload.title,
            description: payload.description,
            url: payload.url,
        })
        .await?;

    Ok(Created(entry))
}

/// List how-to-help entries
#[utoipa::path(
    get,
    path = "/how-to-help",
    tag = "HowToHelp",
    params(PageRequest),
    responses((status = 200, description = "Paginated entry list"))
)]
pub async fn list_entries(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<Paginated<HowToHelp>>> {
    let entries = state.how_to_help_service.list(page).await?;
    Ok(Json(entries))
}

/// Fetch one how-to-help entry
#[utoipa::path(
    get,
    path = "/how-to-help/{id}",
    tag = "HowToHelp",
    responses(
        (status = 200, description = "Entry", body = HowToHelp),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<HowToHelp>> {
    let entry = state.how_to_help_service.get(id).await?;
    Ok(Json(entry))
}

/// Update a how-to-help entry
#[utoipa::path(
    patch,
    path = "/how-to-help/{id}",
    tag = "HowToHelp",
    request_body = UpdateHowToHelpRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated entry", body = HowToHelp),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn update_entry(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateHowToHelpRequest>,
) -> AppResult<Json<HowToHelp>> {
    let entry = state
        .how_to_help_service
        .update(
            id,
            HowToHelpUpdate {
                title: payload.title,
                description: payload.description,
                url: payload.url,
            },
        )
        .await?;

    Ok(Json(entry))
}

/// Delete a how-to-help entry
#[utoipa::path(
    delete,
    path = "/how-to-help/{id}",
    tag = "HowToHelp",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn delete_entry(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.how_to_help_service.delete(id).await?;
    Ok(NoContent)
}
