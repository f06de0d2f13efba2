//! Newsletter subscription repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::newsletter::{self, Entity as SubscriptionEntity};
use crate::domain::Subscription;
use crate::errors::AppResult;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait NewsletterRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Subscription>>;

    /// Insert a subscription row; the unique index on email is the backstop
    /// against concurrent duplicate subscribes.
    async fn create(&self, email: String) -> AppResult<Subscription>;
}

/// SeaORM-backed implementation of [`NewsletterRepository`]
pub struct NewsletterStore {
    db: DatabaseConnection,
}

impl NewsletterStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NewsletterRepository for NewsletterStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Subscription>> {
        let result = SubscriptionEntity::find()
            .filter(newsletter::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(Subscription::from))
    }

    async fn create(&self, email: String) -> AppResult<Subscription> {
        let active_model = newsletter::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            created_at: Set(Utc::now()),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Subscription::from(model))
    }
}
