//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and
//! infrastructure.

use std::sync::Arc;

use crate::infra::{Cache, Database, EmailQueue, FileStorage};
use crate::services::{
    AdminService, AuthService, CampaignService, DonationService, DonorService, EventService,
    HowToHelpService, MetricsService, NewsService, NewsletterService, ServiceContainer, Services,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub donor_service: Arc<dyn DonorService>,
    pub admin_service: Arc<dyn AdminService>,
    pub campaign_service: Arc<dyn CampaignService>,
    pub donation_service: Arc<dyn DonationService>,
    pub event_service: Arc<dyn EventService>,
    pub news_service: Arc<dyn NewsService>,
    pub how_to_help_service: Arc<dyn HowToHelpService>,
    pub newsletter_service: Arc<dyn NewsletterService>,
    pub metrics_service: Arc<dyn MetricsService>,
    /// Redis cache
    pub cache: Arc<Cache>,
    /// Database connection
    pub database: Arc<Database>,
    /// S3-compatible object storage
    pub storage: FileStorage,
    /// Outbound mail queue
    pub queue: Arc<dyn EmailQueue>,
}

impl AppState {
    /// Create application state from infrastructure handles and config.
    pub fn from_config(
        database: Arc<Database>,
        cache: Arc<Cache>,
        storage: FileStorage,
        queue: Arc<dyn EmailQueue>,
        config: crate::config::Config,
    ) -> Self {
        let container = Arc::new(Services::from_connection(
            database.get_connection(),
            queue.clone(),
            config,
        ));

        Self {
            auth_service: container.auth(),
            donor_service: container.donors(),
            admin_service: container.admins(),
            campaign_service: container.campaigns(),
            donation_service: container.donations(),
            event_service: container.events(),
            news_service: container.news(),
            how_to_help_service: container.how_to_help(),
            newsletter_service: container.newsletter(),
            metrics_service: container.metrics(),
            cache,
            database,
            storage,
            queue,
        }
    }
}
