//! Donation and payment domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Recurrence cadence of a donation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Periodicity {
    Monthly,
    Quarterly,
    Yearly,
}

impl From<&str> for Periodicity {
    fn from(s: &str) -> Self {
        match s {
            "quarterly" => Periodicity::Quarterly,
            "yearly" => Periodicity::Yearly,
            _ => Periodicity::Monthly,
        }
    }
}

impl std::fmt::Display for Periodicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Periodicity::Monthly => "monthly",
            Periodicity::Quarterly => "quarterly",
            Periodicity::Yearly => "yearly",
        };
        write!(f, "{}", s)
    }
}

/// Payment rail used to settle a donation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Pix,
    CreditCard,
    BankSlip,
}

impl From<&str> for PaymentMethod {
    fn from(s: &str) -> Self {
        match s {
            "credit_card" => PaymentMethod::CreditCard,
            "bank_slip" => PaymentMethod::BankSlip,
            _ => PaymentMethod::Pix,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentMethod::Pix => "pix",
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::BankSlip => "bank_slip",
        };
        write!(f, "{}", s)
    }
}

/// Payment settlement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Confirmed,
    Failed,
    Refunded,
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        match s {
            "confirmed" => PaymentStatus::Confirmed,
            "failed" => PaymentStatus::Failed,
            "refunded" => PaymentStatus::Refunded,
            _ => PaymentStatus::Pending,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Confirmed => "confirmed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        };
        write!(f, "{}", s)
    }
}

/// Donation record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donation {
    pub id: Uuid,
    pub donor_id: Uuid,
    /// Absent for donations made outside any campaign
    pub campaign_id: Option<Uuid>,
    pub amount_cents: i64,
    /// Absent for one-off donations
    pub periodicity: Option<Periodicity>,
    pub created_at: DateTime<Utc>,
}

/// Payment record, always created alongside its donation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub donation_id: Uuid,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub amount_cents: i64,
    pub paid_at: Option<DateTime<Utc>>,
}

/// Donation with its payment list
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationDetails {
    pub id: Uuid,
    pub donor_id: Uuid,
    pub campaign_id: Option<Uuid>,
    pub amount_cents: i64,
    pub periodicity: Option<Periodicity>,
    pub created_at: DateTime<Utc>,
    pub payments: Vec<Payment>,
}
