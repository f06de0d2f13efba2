//! Repository layer - Data access abstraction
//!
//! One contract trait per resource; SeaORM-backed stores satisfy them.
//! Finder methods return `Option` so not-found handling stays in the
//! service layer.

mod admin_repository;
mod campaign_repository;
mod donation_repository;
mod donor_repository;
pub(crate) mod entities;
mod event_repository;
mod how_to_help_repository;
mod metrics_repository;
mod news_repository;
mod newsletter_repository;
mod password_reset_token_repository;
mod user_repository;

pub use admin_repository::{AdminRepository, AdminStore};
pub use campaign_repository::{CampaignRepository, CampaignStore, CampaignUpdate, NewCampaign};
pub use donation_repository::{DonationRepository, DonationStore};
pub use donor_repository::{DonorRepository, DonorStore, DonorUpdate, NewDonor};
pub use event_repository::{EventRepository, EventStore, EventUpdate, NewEvent};
pub use how_to_help_repository::{
    HowToHelpRepository, HowToHelpStore, HowToHelpUpdate, NewHowToHelp,
};
pub use metrics_repository::{MetricsRepository, MetricsStore};
pub use news_repository::{NewNews, NewsRepository, NewsStore, NewsUpdate};
pub use newsletter_repository::{NewsletterRepository, NewsletterStore};
pub use password_reset_token_repository::{
    PasswordResetTokenRepository, PasswordResetTokenStore,
};
pub use user_repository::{NewUser, UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use admin_repository::MockAdminRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use campaign_repository::MockCampaignRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use donation_repository::MockDonationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use donor_repository::MockDonorRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use event_repository::MockEventRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use how_to_help_repository::MockHowToHelpRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use metrics_repository::MockMetricsRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use news_repository::MockNewsRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use newsletter_repository::MockNewsletterRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use password_reset_token_repository::MockPasswordResetTokenRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
