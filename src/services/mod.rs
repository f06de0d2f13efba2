//! Application services layer - Use cases and business logic.
//!
//! One service trait per resource area. Implementations orchestrate
//! repositories through the Unit of Work; they never build HTTP responses
//! and they signal failures through the shared error taxonomy.

mod admin_service;
mod auth_service;
mod campaign_service;
pub mod container;
mod content_service;
mod donation_service;
mod donor_service;
mod metrics_service;
mod newsletter_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use admin_service::{AdminManager, AdminService, CreateAdmin};
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use campaign_service::{CampaignManager, CampaignService};
pub use content_service::{ContentManager, EventService, HowToHelpService, NewsService};
pub use donation_service::{CreateDonation, DonationManager, DonationService};
pub use donor_service::{DonorManager, DonorService, RegisterDonor, UpdateDonorProfile};
pub use metrics_service::{MetricsManager, MetricsService};
pub use newsletter_service::{NewsletterManager, NewsletterService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
