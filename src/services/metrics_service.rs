//! Metrics service.
//!
//! Thin pass-through to the aggregation queries; the service only turns
//! the requested window into a cutoff timestamp.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::domain::{DonorDistribution, MethodTotal, PeriodBucket, PeriodPoint, SummaryTotals};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Metrics service trait for dependency injection.
#[async_trait]
pub trait MetricsService: Send + Sync {
    /// Rolling-window totals for the last `days` days
    async fn summary(&self, days: u32) -> AppResult<SummaryTotals>;

    /// Donor gender and age distribution for a registration date range
    async fn donor_distribution(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<DonorDistribution>;

    /// Donation totals grouped by payment method
    async fn totals_by_payment_method(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<MethodTotal>>;

    /// Amount raised per time bucket
    async fn raised_by_period(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        bucket: PeriodBucket,
    ) -> AppResult<Vec<PeriodPoint>>;
}

/// Concrete implementation of MetricsService using Unit of Work.
pub struct MetricsManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> MetricsManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    fn check_range(from: DateTime<Utc>, to: DateTime<Utc>) -> AppResult<()> {
        if from > to {
            return Err(AppError::bad_request("Range start must not be after end"));
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> MetricsService for MetricsManager<U> {
    async fn summary(&self, days: u32) -> AppResult<SummaryTotals> {
        if days == 0 {
            return Err(AppError::bad_request("Window must be at least one day"));
        }

        let since = Utc::now() - Duration::days(i64::from(days));
        self.uow.metrics().summary(since).await
    }

    async fn donor_distribution(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<DonorDistribution> {
        Self::check_range(from, to)?;

        let gender = self.uow.metrics().gender_distribution(from, to).await?;
        let age = self.uow.metrics().age_distribution(from, to).await?;

        Ok(DonorDistribution { gender, age })
    }

    async fn totals_by_payment_method(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<MethodTotal>> {
        Self::check_range(from, to)?;
        self.uow.metrics().totals_by_payment_method(from, to).await
    }

    async fn raised_by_period(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        bucket: PeriodBucket,
    ) -> AppResult<Vec<PeriodPoint>> {
        Self::check_range(from, to)?;
        self.uow.metrics().raised_by_period(from, to, bucket).await
    }
}
