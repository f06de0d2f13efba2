//! Donor domain entity and response shapes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Donor gender enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
    Other,
    Undisclosed,
}

impl From<&str> for Gender {
    fn from(s: &str) -> Self {
        match s {
            "female" => Gender::Female,
            "male" => Gender::Male,
            "other" => Gender::Other,
            _ => Gender::Undisclosed,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Other => "other",
            Gender::Undisclosed => "undisclosed",
        };
        write!(f, "{}", s)
    }
}

/// Donor record (profile attached to a user with the donor role)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub phone: String,
    pub cpf: String,
}

/// Donor profile joined with its user row (safe to return to clients)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonorProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub phone: String,
    pub cpf: String,
    pub created_at: DateTime<Utc>,
}

/// Donor listing entry, profile plus lifetime donated amount
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonorListItem {
    #[serde(flatten)]
    pub profile: DonorProfile,
    /// Lifetime donated amount in cents; 0 when the donor has no donations
    pub total_donated: i64,
}
