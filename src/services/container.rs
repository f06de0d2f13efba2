//! Service Container - Centralized service access.
//!
//! Wires every service implementation to the shared Unit of Work and
//! exposes them behind their traits for dependency injection.

use std::sync::Arc;

use super::{
    AdminService, AuthService, CampaignService, DonationService, DonorService, EventService,
    HowToHelpService, MetricsService, NewsService, NewsletterService,
};
use crate::config::Config;
use crate::infra::{EmailQueue, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;
    fn donors(&self) -> Arc<dyn DonorService>;
    fn admins(&self) -> Arc<dyn AdminService>;
    fn campaigns(&self) -> Arc<dyn CampaignService>;
    fn donations(&self) -> Arc<dyn DonationService>;
    fn events(&self) -> Arc<dyn EventService>;
    fn news(&self) -> Arc<dyn NewsService>;
    fn how_to_help(&self) -> Arc<dyn HowToHelpService>;
    fn newsletter(&self) -> Arc<dyn NewsletterService>;
    fn metrics(&self) -> Arc<dyn MetricsService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth: Arc<dyn AuthService>,
    donors: Arc<dyn DonorService>,
    admins: Arc<dyn AdminService>,
    campaigns: Arc<dyn CampaignService>,
    donations: Arc<dyn DonationService>,
    events: Arc<dyn EventService>,
    news: Arc<dyn NewsService>,
    how_to_help: Arc<dyn HowToHelpService>,
    newsletter: Arc<dyn NewsletterService>,
    metrics: Arc<dyn MetricsService>,
}

impl Services {
    /// Create service container from a database connection, the outbound
    /// mail queue and configuration.
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        queue: Arc<dyn EmailQueue>,
        config: Config,
    ) -> Self {
        use super::{
            AdminManager, Authenticator, CampaignManager, ContentManager, DonationManager,
            DonorManager, MetricsManager, NewsletterManager,
        };

        let uow = Arc::new(Persistence::new(db));
        let content = Arc::new(ContentManager::new(uow.clone()));

        Self {
            auth: Arc::new(Authenticator::new(uow.clone(), queue, config)),
            donors: Arc::new(DonorManager::new(uow.clone())),
            admins: Arc::new(AdminManager::new(uow.clone())),
            campaigns: Arc::new(CampaignManager::new(uow.clone())),
            donations: Arc::new(DonationManager::new(uow.clone())),
            events: content.clone(),
            news: content.clone(),
            how_to_help: content,
            newsletter: Arc::new(NewsletterManager::new(uow.clone())),
            metrics: Arc::new(MetricsManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth.clone()
    }

    fn donors(&self) -> Arc<dyn DonorService> {
        self.donors.clone()
    }

    fn admins(&self) -> Arc<dyn AdminService> {
        self.admins.clone()
    }

    fn campaigns(&self) -> Arc<dyn CampaignService> {
        self.campaigns.clone()
    }

    fn donations(&self) -> Arc<dyn DonationService> {
        self.donations.clone()
    }

    fn events(&self) -> Arc<dyn EventService> {
        self.events.clone()
    }

    fn news(&self) -> Arc<dyn NewsService> {
        self.news.clone()
    }

    fn how_to_help(&self) -> Arc<dyn HowToHelpService> {
        self.how_to_help.clone()
    }

    fn newsletter(&self) -> Arc<dyn NewsletterService> {
        self.newsletter.clone()
    }

    fn metrics(&self) -> Arc<dyn MetricsService> {
        self.metrics.clone()
    }
}
