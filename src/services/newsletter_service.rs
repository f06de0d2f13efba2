//! Newsletter service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::Subscription;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Newsletter service trait for dependency injection.
#[async_trait]
pub trait NewsletterService: Send + Sync {
    /// Subscribe an email address; duplicates surface as Conflict
    async fn subscribe(&self, email: String) -> AppResult<Subscription>;
}

/// Concrete implementation of NewsletterService using Unit of Work.
pub struct NewsletterManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> NewsletterManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> NewsletterService for NewsletterManager<U> {
    async fn subscribe(&self, email: String) -> AppResult<Subscription> {
        if self
            .uow
            .newsletter()
            .find_by_email(&email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Subscription"));
        }

        self.uow.newsletter().create(email).await
    }
}
