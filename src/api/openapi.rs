//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, auth_handler, campaign_handler, donation_handler, donor_handler, event_handler,
    file_handler, how_to_help_handler, mail_handler, metrics_handler, news_handler,
    newsletter_handler,
};
use crate::domain::{
    AdminProfile, AgeBracketCount, CampaignDetails, CampaignStatus, DonationDetails,
    DonorDistribution, DonorListItem, DonorProfile, Event, Gender, GenderCount, HowToHelp,
    MethodTotal, News, Payment, PaymentMethod, PaymentStatus, PeriodBucket, PeriodPoint,
    Periodicity, SummaryTotals, Subscription, UserRole,
};
use crate::services::TokenResponse;

/// OpenAPI documentation for the GiveHub API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "GiveHub API",
        version = "0.1.0",
        description = "Donation-management platform: donors, campaigns, donations, events, news and dashboard metrics",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "API Support", email = "support@givehub.local")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server"),
        (url = "https://api.givehub.example", description = "Production server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::login,
        auth_handler::send_password_reset_token,
        auth_handler::verify_code,
        auth_handler::reset_password,
        // Admin endpoints
        admin_handler::create_admin,
        admin_handler::list_admins,
        admin_handler::get_admin,
        admin_handler::update_admin,
        admin_handler::delete_admin,
        // Donor endpoints
        donor_handler::register,
        donor_handler::list_donors,
        donor_handler::get_donor,
        donor_handler::update_donor,
        donor_handler::delete_donor,
        // Campaign endpoints
        campaign_handler::create_campaign,
        campaign_handler::list_campaigns,
        campaign_handler::root_campaign,
        campaign_handler::get_campaign,
        campaign_handler::update_campaign,
        campaign_handler::update_campaign_status,
        campaign_handler::update_campaign_is_root,
        campaign_handler::delete_campaign,
        // Donation endpoints
        donation_handler::create_donation,
        donation_handler::list_donations,
        donation_handler::list_my_donations,
        donation_handler::get_donation,
        // Event endpoints
        event_handler::create_event,
        event_handler::list_events,
        event_handler::get_event,
        event_handler::update_event,
        event_handler::delete_event,
        // News endpoints
        news_handler::create_news,
        news_handler::list_news,
        news_handler::get_news,
        news_handler::update_news,
        news_handler::delete_news,
        // How-to-help endpoints
        how_to_help_handler::create_entry,
        how_to_help_handler::list_entries,
        how_to_help_handler::get_entry,
        how_to_help_handler::update_entry,
        how_to_help_handler::delete_entry,
        // Newsletter endpoints
        newsletter_handler::subscribe,
        // Metrics endpoints
        metrics_handler::summary,
        metrics_handler::donor_distribution,
        metrics_handler::totals_by_payment_method,
        metrics_handler::raised_by_period,
        // File endpoints
        file_handler::upload_file,
        file_handler::fetch_file,
        file_handler::delete_file,
        // Mail endpoints
        mail_handler::send_mail,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            Gender,
            CampaignStatus,
            Periodicity,
            PaymentMethod,
            PaymentStatus,
            PeriodBucket,
            AdminProfile,
            DonorProfile,
            DonorListItem,
            CampaignDetails,
            DonationDetails,
            Payment,
            Event,
            News,
            HowToHelp,
            Subscription,
            SummaryTotals,
            DonorDistribution,
            GenderCount,
            AgeBracketCount,
            MethodTotal,
            PeriodPoint,
            // Auth types
            auth_handler::LoginRequest,
            auth_handler::SendResetTokenRequest,
            auth_handler::VerifyCodeRequest,
            auth_handler::ResetPasswordRequest,
            TokenResponse,
            // Request types
            admin_handler::CreateAdminRequest,
            admin_handler::UpdateAdminRequest,
            donor_handler::RegisterDonorRequest,
            donor_handler::UpdateDonorRequest,
            campaign_handler::CreateCampaignRequest,
            campaign_handler::UpdateCampaignRequest,
            campaign_handler::UpdateCampaignStatusRequest,
            donation_handler::CreateDonationRequest,
            event_handler::CreateEventRequest,
            event_handler::UpdateEventRequest,
            news_handler::CreateNewsRequest,
            news_handler::UpdateNewsRequest,
            how_to_help_handler::CreateHowToHelpRequest,
            how_to_help_handler::UpdateHowToHelpRequest,
            newsletter_handler::SubscribeRequest,
            mail_handler::SendMailRequest,
            // File types
            file_handler::FileUploadResponse,
            file_handler::FileUrlResponse,
            file_handler::FileDeletedResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and password reset"),
        (name = "Admins", description = "Administrator account management"),
        (name = "Donors", description = "Donor registration and profiles"),
        (name = "Campaigns", description = "Fundraising campaign management"),
        (name = "Donations", description = "Donations and payments"),
        (name = "Events", description = "Public events"),
        (name = "News", description = "News entries"),
        (name = "HowToHelp", description = "How-to-help entries"),
        (name = "Newsletter", description = "Newsletter subscriptions"),
        (name = "Metrics", description = "Dashboard aggregates"),
        (name = "Files", description = "Object storage"),
        (name = "Mail", description = "Outbound email")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
