//! Newsletter service tests.

mod common;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use givehub::domain::Subscription;
use givehub::errors::{AppError, AppResult};
use givehub::infra::NewsletterRepository;
use givehub::services::{NewsletterManager, NewsletterService};

use common::TestUnitOfWork;

/// In-memory subscription store
#[derive(Default)]
struct InMemoryNewsletterRepository {
    subscriptions: Mutex<Vec<Subscription>>,
}

#[async_trait]
impl NewsletterRepository for InMemoryNewsletterRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Subscription>> {
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.email == email)
            .cloned())
    }

    async fn create(&self, email: String) -> AppResult<Subscription> {
        let subscription = Subscription {
            id: Uuid::new_v4(),
            email,
            created_at: Utc::now(),
        };
        self.subscriptions
            .lock()
            .unwrap()
            .push(subscription.clone());
        Ok(subscription)
    }
}

#[tokio::test]
async fn subscribing_a_new_address_succeeds() {
    let repo = Arc::new(InMemoryNewsletterRepository::default());
    let uow = TestUnitOfWork::new().with_newsletter(repo.clone());
    let service = NewsletterManager::new(Arc::new(uow));

    let subscription = service
        .subscribe("reader@example.com".to_string())
        .await
        .unwrap();

    assert_eq!(subscription.email, "reader@example.com");
    assert_eq!(repo.subscriptions.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn subscribing_the_same_address_twice_is_a_conflict() {
    let repo = Arc::new(InMemoryNewsletterRepository::default());
    let uow = TestUnitOfWork::new().with_newsletter(repo.clone());
    let service = NewsletterManager::new(Arc::new(uow));

    service
        .subscribe("reader@example.com".to_string())
        .await
        .unwrap();

    let result = service.subscribe("reader@example.com".to_string()).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
    // The duplicate never reached storage
    assert_eq!(repo.subscriptions.lock().unwrap().len(), 1);
}
