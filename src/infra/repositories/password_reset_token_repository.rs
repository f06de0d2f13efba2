//! Password reset token repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::password_reset_token::{self, Entity as TokenEntity};
use crate::domain::PasswordResetToken;
use crate::errors::AppResult;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait PasswordResetTokenRepository: Send + Sync {
    /// Look a token up by its value
    async fn find_by_token(&self, token: &str) -> AppResult<Option<PasswordResetToken>>;

    async fn create(
        &self,
        user_id: Uuid,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> AppResult<PasswordResetToken>;

    /// Remove every token a user holds; returns the number deleted
    async fn delete_by_user_id(&self, user_id: Uuid) -> AppResult<u64>;
}

/// SeaORM-backed implementation of [`PasswordResetTokenRepository`]
pub struct PasswordResetTokenStore {
    db: DatabaseConnection,
}

impl PasswordResetTokenStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PasswordResetTokenRepository for PasswordResetTokenStore {
    async fn find_by_token(&self, token: &str) -> AppResult<Option<PasswordResetToken>> {
        let result = TokenEntity::find()
            .filter(password_reset_token::Column::Token.eq(token))
            .one(&self.db)
            .await?;

        Ok(result.map(PasswordResetToken::from))
    }

    async fn create(
        &self,
        user_id: Uuid,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> AppResult<PasswordResetToken> {
        let active_model = password_reset_token::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            token: Set(token),
            expires_at: Set(expires_at),
            created_at: Set(Utc::now()),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(PasswordResetToken::from(model))
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> AppResult<u64> {
        let result = TokenEntity::delete_many()
            .filter(password_reset_token::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
