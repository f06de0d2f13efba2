//! Outbound mail handlers. All routes are admin-gated.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{AdminUser, ValidatedJson};
use crate::api::AppState;
use crate::errors::AppResult;
use crate::jobs::EmailJob;
use crate::types::MessageResponse;

/// Outbound mail request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendMailRequest {
    /// Recipient address
    #[validate(email(message = "Invalid recipient address"))]
    #[schema(example = "donor@example.com")]
    pub to: String,
    #[validate(length(min = 1, message = "Subject is required"))]
    #[schema(example = "Thank you for donating")]
    pub subject: String,
    #[validate(length(min = 1, message = "Body is required"))]
    pub body: String,
}

/// Admin-only mail routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/mail/send", post(send_mail))
}

/// Enqueue an outbound email
#[utoipa::path(
    post,
    path = "/mail/send",
    tag = "Mail",
    request_body = SendMailRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 202, description = "Email queued for delivery"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn send_mail(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(payload): ValidatedJson<SendMailRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state
        .queue
        .enqueue(EmailJob::new(payload.to, payload.subject, payload.body))
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("Email queued")),
    ))
}
