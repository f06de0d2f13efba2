//! Newsletter handlers.

use axum::{extract::State, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::Subscription;
use crate::errors::AppResult;
use crate::types::Created;

/// Newsletter subscription request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubscribeRequest {
    /// Email address to subscribe
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "reader@example.com")]
    pub email: String,
}

/// Public newsletter routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/newsletter", post(subscribe))
}

/// Subscribe to the newsletter
#[utoipa::path(
    post,
    path = "/newsletter",
    tag = "Newsletter",
    request_body = SubscribeRequest,
    responses(
        (status = 201, description = "Subscribed", body = Subscription),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already subscribed")
    )
)]
pub async fn subscribe(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SubscribeRequest>,
) -> AppResult<Created<Subscription>> {
    let subscription = state.newsletter_service.subscribe(payload.email).await?;
    Ok(Created(subscription))
}
