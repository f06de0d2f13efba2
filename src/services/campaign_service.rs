//! Campaign service.
//!
//! CRUD plus the two campaign-specific rules: status transitions and the
//! single-root-flag procedure.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Campaign, CampaignDetails, CampaignStatus};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{CampaignUpdate, NewCampaign};
use crate::infra::UnitOfWork;
use crate::types::{PageRequest, Paginated};

/// Campaign service trait for dependency injection.
#[async_trait]
pub trait CampaignService: Send + Sync {
    async fn create(&self, input: NewCampaign) -> AppResult<Campaign>;

    async fn list(
        &self,
        page: PageRequest,
        status: Option<CampaignStatus>,
    ) -> AppResult<Paginated<CampaignDetails>>;

    async fn get(&self, id: Uuid) -> AppResult<CampaignDetails>;

    /// The campaign currently flagged for default display, if any
    async fn root_campaign(&self) -> AppResult<Option<Campaign>>;

    async fn update(&self, id: Uuid, input: CampaignUpdate) -> AppResult<Campaign>;

    async fn set_status(&self, id: Uuid, status: CampaignStatus) -> AppResult<Campaign>;

    /// Make `id` the root campaign, clearing the previous holder
    async fn set_root(&self, id: Uuid) -> AppResult<Campaign>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of CampaignService using Unit of Work.
pub struct CampaignManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CampaignManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CampaignService for CampaignManager<U> {
    async fn create(&self, input: NewCampaign) -> AppResult<Campaign> {
        self.uow.campaigns().create(input).await
    }

    async fn list(
        &self,
        page: PageRequest,
        status: Option<CampaignStatus>,
    ) -> AppResult<Paginated<CampaignDetails>> {
        let (details, total) = self
            .uow
            .campaigns()
            .list(page.offset(), page.limit(), status)
            .await?;

        Ok(Paginated::new(details, page.page, page.limit(), total))
    }

    async fn get(&self, id: Uuid) -> AppResult<CampaignDetails> {
        self.uow
            .campaigns()
            .find_details(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn root_campaign(&self) -> AppResult<Option<Campaign>> {
        self.uow.campaigns().find_root().await
    }

    async fn update(&self, id: Uuid, input: CampaignUpdate) -> AppResult<Campaign> {
        self.uow
            .campaigns()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.uow.campaigns().update(id, input).await
    }

    async fn set_status(&self, id: Uuid, status: CampaignStatus) -> AppResult<Campaign> {
        self.uow
            .campaigns()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.uow.campaigns().set_status(id, status).await
    }

    async fn set_root(&self, id: Uuid) -> AppResult<Campaign> {
        let target = self
            .uow
            .campaigns()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        // Clear the previous holder, then set the target. These are two
        // independent writes with no transaction around them: a concurrent
        // reassignment can momentarily leave zero or two flagged rows.
        let current_root = self.uow.campaigns().find_root().await?;
        if let Some(current) = current_root {
            if current.id != target.id && current.is_root {
                self.uow.campaigns().set_is_root(current.id, false).await?;
            }
        }

        self.uow.campaigns().set_is_root(target.id, true).await?;

        self.uow
            .campaigns()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.campaigns().delete(id).await
    }
}
