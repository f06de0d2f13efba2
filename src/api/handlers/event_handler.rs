//! Event handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{AdminUser, ValidatedJson};
use crate::api::AppState;
use crate::domain::Event;
use crate::errors::AppResult;
use crate::infra::repositories::{EventUpdate, NewEvent};
use crate::types::{Created, NoContent, PageRequest, Paginated};

/// Event creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Charity run")]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    #[validate(length(min = 1, message = "Location is required"))]
    #[schema(example = "Ibirapuera Park")]
    pub location: String,
    #[validate(url(message = "Invalid URL"))]
    pub url: Option<String>,
}

/// Event update request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: Option<String>,
    #[validate(url(message = "Invalid URL"))]
    pub url: Option<String>,
}

/// Event routes; reads are public, writes are admin-gated through the
/// `AdminUser` guard
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/:id",
            get(get_event).patch(update_event).delete(delete_event),
        )
}

/// Create an event
#[utoipa::path(
    post,
    path = "/events",
    tag = "Events",
    request_body = CreateEventRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateEventRequest>,
) -> AppResult<Created<Event>> {
    let event = state
        .event_service
        .create(NewEvent {
            title: payload.title,
            description: payload.description,
            starts_at: payload.starts_at,
            ends_at: payload.ends_at,
            location: payload.location,
            url: payload.url,
        })
        .await?;

    Ok(Created(event))
}

/// List events
#[utoipa::path(
    get,
    path = "/events",
    tag = "Events",
    params(PageRequest),
    responses((status = 200, description = "Paginated event list"))
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> AppResult<Json<Paginated<Event>>> {
    let events = state.event_service.list(page).await?;
    Ok(Json(events))
}

/// Fetch one event
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "Events",
    responses(
        (status = 200, description = "Event", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Event>> {
    let event = state.event_service.get(id).await?;
    Ok(Json(event))
}

/// Update an event
#[utoipa::path(
    patch,
    path = "/events/{id}",
    tag = "Events",
    request_body = UpdateEventRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated event", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateEventRequest>,
) -> AppResult<Json<Event>> {
    let event = state
        .event_service
        .update(
            id,
            EventUpdate {
                title: payload.title,
                description: payload.description,
                starts_at: payload.starts_at,
                ends_at: payload.ends_at,
                location: payload.location,
                url: payload.url,
            },
        )
        .await?;

    Ok(Json(event))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "Events",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.event_service.delete(id).await?;
    Ok(NoContent)
}
