//! Donation repository (reads).
//!
//! Donation and payment rows are only ever written through the unit of
//! work's transaction context, so this contract is read-only.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use super::entities::{
    donation::{self, Entity as DonationEntity},
    payment,
};
use crate::domain::{Donation, DonationDetails, Payment, Periodicity};
use crate::errors::AppResult;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait DonationRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Donation>>;

    /// Donation with its payment list
    async fn find_details(&self, id: Uuid) -> AppResult<Option<DonationDetails>>;

    async fn list(&self, offset: u64, limit: u64) -> AppResult<(Vec<DonationDetails>, u64)>;

    async fn list_by_donor(
        &self,
        donor_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<DonationDetails>, u64)>;
}

/// SeaORM-backed implementation of [`DonationRepository`]
pub struct DonationStore {
    db: DatabaseConnection,
}

impl DonationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn details(model: donation::Model, payments: Vec<payment::Model>) -> DonationDetails {
        DonationDetails {
            id: model.id,
            donor_id: model.donor_id,
            campaign_id: model.campaign_id,
            amount_cents: model.amount_cents,
            periodicity: model.periodicity.as_deref().map(Periodicity::from),
            created_at: model.created_at,
            payments: payments.into_iter().map(Payment::from).collect(),
        }
    }

    /// Fetch one page of donations and attach their payments in a second
    /// query instead of a row-multiplying join.
    async fn page_with_payments(
        &self,
        query: sea_orm::Select<DonationEntity>,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<DonationDetails>, u64)> {
        let paginator = query.paginate(&self.db, limit.max(1));
        let total = paginator.num_items().await?;
        let donations = paginator.fetch_page(offset / limit.max(1)).await?;

        let payments = donations.load_many(payment::Entity, &self.db).await?;

        let details = donations
            .into_iter()
            .zip(payments)
            .map(|(donation, payments)| Self::details(donation, payments))
            .collect();

        Ok((details, total))
    }
}

#[async_trait]
impl DonationRepository for DonationStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Donation>> {
        let result = DonationEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Donation::from))
    }

    async fn find_details(&self, id: Uuid) -> AppResult<Option<DonationDetails>> {
        let Some(model) = DonationEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let payments = payment::Entity::find()
            .filter(payment::Column::DonationId.eq(model.id))
            .all(&self.db)
            .await?;

        Ok(Some(Self::details(model, payments)))
    }

    async fn list(&self, offset: u64, limit: u64) -> AppResult<(Vec<DonationDetails>, u64)> {
        let query = DonationEntity::find().order_by_desc(donation::Column::CreatedAt);
        self.page_with_payments(query, offset, limit).await
    }

    async fn list_by_donor(
        &self,
        donor_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<DonationDetails>, u64)> {
        let query = DonationEntity::find()
            .filter(donation::Column::DonorId.eq(donor_id))
            .order_by_desc(donation::Column::CreatedAt);
        self.page_with_payments(query, offset, limit).await
    }
}
