//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Redis cache
//! - S3-compatible object storage
//! - The outbound mail queue
//! - Unit of Work for transaction management

pub mod cache;
pub mod db;
pub mod queue;
pub mod repositories;
pub mod storage;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use queue::{EmailQueue, PostgresEmailQueue};
pub use repositories::{
    AdminRepository, CampaignRepository, DonationRepository, DonorRepository, EventRepository,
    HowToHelpRepository, MetricsRepository, NewsRepository, NewsletterRepository,
    PasswordResetTokenRepository, UserRepository,
};
pub use storage::{FileStorage, SignedUrl};
pub use unit_of_work::{
    NewDonation, Persistence, TransactionContext, TxCampaignRepository, TxDonationRepository,
    TxPaymentRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use queue::MockEmailQueue;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockAdminRepository, MockCampaignRepository, MockDonationRepository, MockDonorRepository,
    MockEventRepository, MockHowToHelpRepository, MockMetricsRepository, MockNewsRepository,
    MockNewsletterRepository, MockPasswordResetTokenRepository, MockUserRepository,
};
