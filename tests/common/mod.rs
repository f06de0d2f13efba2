//! Shared test harness: a Unit of Work wrapper over per-test repository
//! fakes. Only the repositories a test wires in are reachable; touching
//! any other repository is a test bug and panics.

// Each test binary uses a different subset of the harness
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;

use givehub::errors::{AppError, AppResult};
use givehub::infra::{
    AdminRepository, CampaignRepository, DonationRepository, DonorRepository, EventRepository,
    HowToHelpRepository, MetricsRepository, NewsRepository, NewsletterRepository,
    PasswordResetTokenRepository, TransactionContext, UnitOfWork, UserRepository,
};

#[derive(Default)]
pub struct TestUnitOfWork {
    pub users: Option<Arc<dyn UserRepository>>,
    pub donors: Option<Arc<dyn DonorRepository>>,
    pub admins: Option<Arc<dyn AdminRepository>>,
    pub campaigns: Option<Arc<dyn CampaignRepository>>,
    pub donations: Option<Arc<dyn DonationRepository>>,
    pub events: Option<Arc<dyn EventRepository>>,
    pub news: Option<Arc<dyn NewsRepository>>,
    pub how_to_help: Option<Arc<dyn HowToHelpRepository>>,
    pub newsletter: Option<Arc<dyn NewsletterRepository>>,
    pub reset_tokens: Option<Arc<dyn PasswordResetTokenRepository>>,
    pub metrics: Option<Arc<dyn MetricsRepository>>,
}

impl TestUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.users = Some(repo);
        self
    }

    pub fn with_donors(mut self, repo: Arc<dyn DonorRepository>) -> Self {
        self.donors = Some(repo);
        self
    }

    pub fn with_campaigns(mut self, repo: Arc<dyn CampaignRepository>) -> Self {
        self.campaigns = Some(repo);
        self
    }

    pub fn with_donations(mut self, repo: Arc<dyn DonationRepository>) -> Self {
        self.donations = Some(repo);
        self
    }

    pub fn with_newsletter(mut self, repo: Arc<dyn NewsletterRepository>) -> Self {
        self.newsletter = Some(repo);
        self
    }

    pub fn with_reset_tokens(mut self, repo: Arc<dyn PasswordResetTokenRepository>) -> Self {
        self.reset_tokens = Some(repo);
        self
    }
}

fn wired<T: ?Sized>(repo: &Option<Arc<T>>, name: &str) -> Arc<T> {
    repo.clone()
        .unwrap_or_else(|| panic!("{} repository not wired into TestUnitOfWork", name))
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        wired(&self.users, "user")
    }

    fn donors(&self) -> Arc<dyn DonorRepository> {
        wired(&self.donors, "donor")
    }

    fn admins(&self) -> Arc<dyn AdminRepository> {
        wired(&self.admins, "admin")
    }

    fn campaigns(&self) -> Arc<dyn CampaignRepository> {
        wired(&self.campaigns, "campaign")
    }

    fn donations(&self) -> Arc<dyn DonationRepository> {
        wired(&self.donations, "donation")
    }

    fn events(&self) -> Arc<dyn EventRepository> {
        wired(&self.events, "event")
    }

    fn news(&self) -> Arc<dyn NewsRepository> {
        wired(&self.news, "news")
    }

    fn how_to_help(&self) -> Arc<dyn HowToHelpRepository> {
        wired(&self.how_to_help, "how_to_help")
    }

    fn newsletter(&self) -> Arc<dyn NewsletterRepository> {
        wired(&self.newsletter, "newsletter")
    }

    fn reset_tokens(&self) -> Arc<dyn PasswordResetTokenRepository> {
        wired(&self.reset_tokens, "reset token")
    }

    fn metrics(&self) -> Arc<dyn MetricsRepository> {
        wired(&self.metrics, "metrics")
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Transactions need a live database; service tests stop at the
        // preconditions in front of them
        Err(AppError::internal(
            "Transactions not supported in test harness",
        ))
    }
}
