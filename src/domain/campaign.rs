//! Campaign domain entity and response shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Campaign lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Active,
    Finished,
    Cancelled,
}

impl From<&str> for CampaignStatus {
    fn from(s: &str) -> Self {
        match s {
            "active" => CampaignStatus::Active,
            "finished" => CampaignStatus::Finished,
            "cancelled" => CampaignStatus::Cancelled,
            _ => CampaignStatus::Draft,
        }
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Active => "active",
            CampaignStatus::Finished => "finished",
            CampaignStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// Campaign record.
///
/// At most one campaign carries `is_root = true` at a time; the flag marks
/// the campaign shown by default on the donation page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub target_amount_cents: i64,
    pub current_amount_cents: i64,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub status: CampaignStatus,
    /// User id of the admin that created the campaign
    pub created_by: Uuid,
    pub is_root: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Campaign joined with its creator's name
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDetails {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub target_amount_cents: i64,
    pub current_amount_cents: i64,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub status: CampaignStatus,
    pub is_root: bool,
    pub created_by: Uuid,
    /// Creator name; absent when the creating admin was removed
    pub created_by_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
