//! Authentication service.
//!
//! Login, token issuance/verification, and the password reset flow
//! (send code, verify code, reset password).

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{
    Config, RESET_TOKEN_TTL_MINUTES, SECONDS_PER_HOUR, TOKEN_ISSUER, TOKEN_TYPE_BEARER,
};
use crate::domain::{Password, ResetCode, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{EmailQueue, UnitOfWork};
use crate::jobs::EmailJob;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: String,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Login and return JWT token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Generate a reset code, persist it and enqueue the reset email
    async fn send_password_reset_token(&self, email: String) -> AppResult<()>;

    /// Check a reset code without consuming it
    async fn verify_code(&self, email: String, code: String) -> AppResult<()>;

    /// Check a reset code, store the new password and consume the code
    async fn reset_password(
        &self,
        email: String,
        code: String,
        new_password: String,
    ) -> AppResult<()>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for a user (shared helper to avoid duplication)
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        role: user.role.to_string(),
        iss: TOKEN_ISSUER.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Verify JWT token and extract claims (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let mut validation = Validation::default();
    validation.set_issuer(&[TOKEN_ISSUER]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    queue: Arc<dyn EmailQueue>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, queue: Arc<dyn EmailQueue>, config: Config) -> Self {
        Self { uow, queue, config }
    }

    /// Run the reset code checks in order: the code exists, it belongs to
    /// the given user, and it has not expired.
    async fn check_reset_code(&self, email: &str, code: &str) -> AppResult<User> {
        let user = self
            .uow
            .users()
            .find_by_email(email)
            .await?
            .ok_or(AppError::NotFound)?;

        let token = self
            .uow
            .reset_tokens()
            .find_by_token(code)
            .await?
            .ok_or_else(|| AppError::bad_request("Invalid reset code"))?;

        if token.user_id != user.id {
            return Err(AppError::bad_request("Invalid reset code"));
        }

        if token.is_expired(Utc::now()) {
            return Err(AppError::bad_request("Reset code expired"));
        }

        Ok(user)
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user_result = self.uow.users().find_by_email(&email).await?;

        // SECURITY: Perform password verification even if user doesn't exist
        // to prevent timing attacks that could enumerate valid emails.
        // We use a dummy hash that will always fail verification.
        let dummy_hash = "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        // Only succeed if both user exists AND password is valid
        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        match user_result {
            Some(user) => generate_token(&user, &self.config),
            None => Err(AppError::InvalidCredentials),
        }
    }

    async fn send_password_reset_token(&self, email: String) -> AppResult<()> {
        let user = self
            .uow
            .users()
            .find_by_email(&email)
            .await?
            .ok_or(AppError::NotFound)?;

        // A user holds at most one useful code at a time
        self.uow.reset_tokens().delete_by_user_id(user.id).await?;

        let code = ResetCode::generate();
        let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES);

        self.uow
            .reset_tokens()
            .create(user.id, code.as_str().to_string(), expires_at)
            .await?;

        let job = EmailJob::new(
            user.email.clone(),
            "Password reset code",
            format!(
                "Hello {},\n\nYour password reset code is: {}\n\n\
                 It expires in {} minutes. If you did not request a reset, \
                 you can ignore this message.",
                user.full_name, code, RESET_TOKEN_TTL_MINUTES
            ),
        )
        .with_from(self.config.mail_from.clone())
        .with_reply_to(self.config.mail_reply_to.clone());

        self.queue.enqueue(job).await?;

        tracing::info!(user_id = %user.id, "Password reset code issued");
        Ok(())
    }

    async fn verify_code(&self, email: String, code: String) -> AppResult<()> {
        self.check_reset_code(&email, &code).await?;
        Ok(())
    }

    async fn reset_password(
        &self,
        email: String,
        code: String,
        new_password: String,
    ) -> AppResult<()> {
        let user = self.check_reset_code(&email, &code).await?;

        let password_hash = Password::new(&new_password)?.into_string();
        self.uow
            .users()
            .update_password(user.id, password_hash)
            .await?;

        // Consume the whole batch so the code cannot be replayed
        self.uow.reset_tokens().delete_by_user_id(user.id).await?;

        tracing::info!(user_id = %user.id, "Password reset completed");
        Ok(())
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}
