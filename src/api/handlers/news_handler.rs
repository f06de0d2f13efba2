//! News handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{AdminUser, ValidatedJson};
use crate::api::AppState;
use crate::domain::News;
use crate::errors::AppResult;
use crate::infra::repositories::{NewNews, NewsUpdate};
use crate::types::{Created, NoContent, PageRequest, Paginated};

/// News creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "New shelter opened")]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    /// Publication date (YYYY-MM-DD)
    #[schema(example = "2025-03-01")]
    pub published_on: NaiveDate,
    #[validate(url(message = "Invalid URL"))]
    pub url: Option<String>,
}

/// News update request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewsRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    pub published_on: Option<NaiveDate>,
    #[validate(url(message = "Invalid URL"))]
    pub url: Option<String>,
}

/// News routes; reads are public, writes are admin-gated through the
/// `AdminUser` guard
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/news", get(list_news).post(create_news))
        .route(
            "/news/:id",
            get(get_news).patch(update_news).delete(delete_news),
        )
}

/// Create a news entry
#[utoipa::path(
    post,
    path = "/news",
    tag = "News",
    request_body = CreateNewsRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "News entry created", body = News),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn create_news(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateNewsRequest>,
) -> AppResult<Created<News>> {
    let news = state
        .news_service
        .create(NewNews {
            title: payload.title,
            description: payload.description,
            published_on: payload.published_on,
            url: payload.url,
        })
        .await?;

    Ok(Created(news))
}

/// List news entries
#[utoipa::path(
    get,
    path = "/news",
    tag = "News",
    params(PageRequest),
    responses((status = 200, description = "Paginated news list"))
)]
pub async fn list_news(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<Paginated<News>>> {
    let news = state.news_service.list(page).await?;
    Ok(Json(news))
}

/// Fetch one news entry
#[utoipa::path(
    get,
    path = "/news/{id}",
    tag = "News",
    responses(
        (status = 200, description = "News entry", body = News),
        (status = 404, description = "News entry not found")
    )
)]
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<News>> {
    let news = state.news_service.get(id).await?;
    Ok(Json(news))
}

/// Update a news entry
#[utoipa::path(
    patch,
    path = "/news/{id}",
    tag = "News",
    request_body = UpdateNewsRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated news entry", body = News),
        (status = 404, description = "News entry not found")
    )
)]
pub async fn update_news(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateNewsRequest>,
) -> AppResult<Json<News>> {
    let news = state
        .news_service
        .update(
            id,
            NewsUpdate {
                title: payload.title,
                description: payload.description,
                published_on: payload.published_on,
                url: payload.url,
            },
        )
        .await?;

    Ok(Json(news))
}

/// Delete a news entry
#[utoipa::path(
    delete,
    path = "/news/{id}",
    tag = "News",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "News entry deleted"),
        (status = 404, description = "News entry not found")
    )
)]
pub async fn delete_news(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.news_service.delete(id).await?;
    Ok(NoContent)
}
