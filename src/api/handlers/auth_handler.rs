//! Authentication handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::TokenResponse;
use crate::types::MessageResponse;

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "donor@example.com")]
    pub email: String,
    /// User password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Password reset request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendResetTokenRequest {
    /// Email of the account to reset
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "donor@example.com")]
    pub email: String,
}

/// Reset code verification request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyCodeRequest {
    /// Email of the account being reset
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "donor@example.com")]
    pub email: String,
    /// The 6-character code from the reset email
    #[validate(length(equal = 6, message = "Code must be 6 characters"))]
    #[schema(example = "X4J9QT")]
    pub code: String,
}

/// Password reset completion request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    /// Email of the account being reset
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "donor@example.com")]
    pub email: String,
    /// The 6-character code from the reset email
    #[validate(length(equal = 6, message = "Code must be 6 characters"))]
    #[schema(example = "X4J9QT")]
    pub code: String,
    /// New password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "NewSecurePass123!", min_length = 8)]
    pub new_password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route(
            "/auth/send-password-reset-token",
            post(send_password_reset_token),
        )
        .route("/auth/verify-code", post(verify_code))
        .route("/auth/reset-password", post(reset_password))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(token))
}

/// Email a password reset code
#[utoipa::path(
    post,
    path = "/auth/send-password-reset-token",
    tag = "Authentication",
    request_body = SendResetTokenRequest,
    responses(
        (status = 202, description = "Reset code queued"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Unknown email")
    )
)]
pub async fn send_password_reset_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SendResetTokenRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state
        .auth_service
        .send_password_reset_token(payload.email)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("Reset code sent")),
    ))
}

/// Verify a password reset code
#[utoipa::path(
    post,
    path = "/auth/verify-code",
    tag = "Authentication",
    request_body = VerifyCodeRequest,
    responses(
        (status = 200, description = "Code is valid"),
        (status = 400, description = "Missing, foreign or expired code"),
        (status = 404, description = "Unknown email")
    )
)]
pub async fn verify_code(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<VerifyCodeRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .auth_service
        .verify_code(payload.email, payload.code)
        .await?;

    Ok(Json(MessageResponse::new("Code is valid")))
}

/// Complete a password reset
#[utoipa::path(
    post,
    path = "/auth/reset-password",
    tag = "Authentication",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Missing, foreign or expired code"),
        (status = 404, description = "Unknown email")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .auth_service
        .reset_password(payload.email, payload.code, payload.new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password updated")))
}
