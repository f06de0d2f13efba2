//! Metrics repository.
//!
//! Every dashboard aggregate is a single SQL statement; nothing is summed
//! or averaged in process.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use crate::domain::{
    AgeBracketCount, GenderCount, MethodTotal, PeriodBucket, PeriodPoint, SummaryTotals,
};
use crate::errors::AppResult;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Rolling-window totals for donations made at or after `since`
    async fn summary(&self, since: DateTime<Utc>) -> AppResult<SummaryTotals>;

    /// Donor counts per gender, by registration date range
    async fn gender_distribution(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<GenderCount>>;

    /// Donor counts per age bracket, by registration date range
    async fn age_distribution(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<AgeBracketCount>>;

    /// Donation totals grouped by payment method within a date range
    async fn totals_by_payment_method(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<MethodTotal>>;

    /// Amount raised per time bucket within a date range
    async fn raised_by_period(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        bucket: PeriodBucket,
    ) -> AppResult<Vec<PeriodPoint>>;
}

/// SeaORM-backed implementation of [`MetricsRepository`]
pub struct MetricsStore {
    db: DatabaseConnection,
}

impl MetricsStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MetricsRepository for MetricsStore {
    async fn summary(&self, since: DateTime<Utc>) -> AppResult<SummaryTotals> {
        let donation_row = self
            .db
            .query_one(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT COALESCE(SUM(amount_cents), 0)::bigint AS raised_cents, \
                        COUNT(*)::bigint AS donation_count, \
                        COUNT(periodicity)::bigint AS recurring_count, \
                        COALESCE(AVG(amount_cents), 0)::bigint AS average_ticket_cents \
                 FROM donations WHERE created_at >= $1",
                [since.into()],
            ))
            .await?;

        let donor_row = self
            .db
            .query_one(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT COUNT(*)::bigint AS new_donor_count \
                 FROM donors d JOIN users u ON u.id = d.user_id \
                 WHERE u.created_at >= $1 AND u.deleted_at IS NULL",
                [since.into()],
            ))
            .await?;

        let mut totals = SummaryTotals::default();
        if let Some(row) = donation_row {
            totals.raised_cents = row.try_get("", "raised_cents").unwrap_or(0);
            totals.donation_count = row.try_get("", "donation_count").unwrap_or(0);
            totals.recurring_count = row.try_get("", "recurring_count").unwrap_or(0);
            totals.average_ticket_cents = row.try_get("", "average_ticket_cents").unwrap_or(0);
        }
        if let Some(row) = donor_row {
            totals.new_donor_count = row.try_get("", "new_donor_count").unwrap_or(0);
        }

        Ok(totals)
    }

    async fn gender_distribution(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<GenderCount>> {
        let rows = self
            .db
            .query_all(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT d.gender AS gender, COUNT(*)::bigint AS count \
                 FROM donors d JOIN users u ON u.id = d.user_id \
                 WHERE u.created_at BETWEEN $1 AND $2 AND u.deleted_at IS NULL \
                 GROUP BY d.gender ORDER BY d.gender",
                [from.into(), to.into()],
            ))
            .await?;

        let counts = rows
            .into_iter()
            .filter_map(|row| {
                let gender = row.try_get::<String>("", "gender").ok()?;
                let count = row.try_get::<i64>("", "count").ok()?;
                Some(GenderCount { gender, count })
            })
            .collect();

        Ok(counts)
    }

    async fn age_distribution(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<AgeBracketCount>> {
        let rows = self
            .db
            .query_all(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT CASE \
                        WHEN age(d.birth_date) < interval '25 years' THEN 'under_25' \
                        WHEN age(d.birth_date) < interval '35 years' THEN '25_34' \
                        WHEN age(d.birth_date) < interval '50 years' THEN '35_49' \
                        WHEN age(d.birth_date) < interval '65 years' THEN '50_64' \
                        ELSE '65_plus' END AS bracket, \
                        COUNT(*)::bigint AS count \
                 FROM donors d JOIN users u ON u.id = d.user_id \
                 WHERE u.created_at BETWEEN $1 AND $2 AND u.deleted_at IS NULL \
                 GROUP BY bracket ORDER BY bracket",
                [from.into(), to.into()],
            ))
            .await?;

        let counts = rows
            .into_iter()
            .filter_map(|row| {
                let bracket = row.try_get::<String>("", "bracket").ok()?;
                let count = row.try_get::<i64>("", "count").ok()?;
                Some(AgeBracketCount { bracket, count })
            })
            .collect();

        Ok(counts)
    }

    async fn totals_by_payment_method(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<MethodTotal>> {
        let rows = self
            .db
            .query_all(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT p.method AS method, \
                        COALESCE(SUM(p.amount_cents), 0)::bigint AS total_cents, \
                        COUNT(*)::bigint AS count \
                 FROM payments p JOIN donations d ON d.id = p.donation_id \
                 WHERE d.created_at BETWEEN $1 AND $2 \
                 GROUP BY p.method ORDER BY p.method",
                [from.into(), to.into()],
            ))
            .await?;

        let totals = rows
            .into_iter()
            .filter_map(|row| {
                let method = row.try_get::<String>("", "method").ok()?;
                let total_cents = row.try_get::<i64>("", "total_cents").ok()?;
                let count = row.try_get::<i64>("", "count").ok()?;
                Some(MethodTotal {
                    method,
                    total_cents,
                    count,
                })
            })
            .collect();

        Ok(totals)
    }

    async fn raised_by_period(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        bucket: PeriodBucket,
    ) -> AppResult<Vec<PeriodPoint>> {
        let rows = self
            .db
            .query_all(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT date_trunc($3, created_at) AS period, \
                        COALESCE(SUM(amount_cents), 0)::bigint AS total_cents \
                 FROM donations WHERE created_at BETWEEN $1 AND $2 \
                 GROUP BY period ORDER BY period",
                [from.into(), to.into(), bucket.as_sql_unit().into()],
            ))
            .await?;

        let points = rows
            .into_iter()
            .filter_map(|row| {
                let period = row.try_get::<DateTime<Utc>>("", "period").ok()?;
                let total_cents = row.try_get::<i64>("", "total_cents").ok()?;
                Some(PeriodPoint {
                    period,
                    total_cents,
                })
            })
            .collect();

        Ok(points)
    }
}
