//! Dashboard metrics shapes.
//!
//! These are read models produced directly by aggregation queries; no
//! in-process arithmetic happens outside the database.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Rolling-window totals for the dashboard header
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    /// Total raised in the window, in cents
    pub raised_cents: i64,
    /// Number of donations in the window
    pub donation_count: i64,
    /// Number of donations carrying a periodicity
    pub recurring_count: i64,
    /// Donors registered in the window
    pub new_donor_count: i64,
    /// Average donation amount in cents, 0 when there were no donations
    pub average_ticket_cents: i64,
}

/// Donor count per gender
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenderCount {
    pub gender: String,
    pub count: i64,
}

/// Donor count per age bracket
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AgeBracketCount {
    pub bracket: String,
    pub count: i64,
}

/// Donor distribution within a date range
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DonorDistribution {
    pub gender: Vec<GenderCount>,
    pub age: Vec<AgeBracketCount>,
}

/// Donation totals for one payment method
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MethodTotal {
    pub method: String,
    pub total_cents: i64,
    pub count: i64,
}

/// Amount raised in one time bucket
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodPoint {
    pub period: DateTime<Utc>,
    pub total_cents: i64,
}

/// Bucket width for the raised-by-period series
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PeriodBucket {
    Daily,
    Weekly,
    Monthly,
}

impl PeriodBucket {
    /// The matching `date_trunc` field name
    pub fn as_sql_unit(&self) -> &'static str {
        match self {
            PeriodBucket::Daily => "day",
            PeriodBucket::Weekly => "week",
            PeriodBucket::Monthly => "month",
        }
    }
}
