//! Campaign repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::{
    campaign::{self, Entity as CampaignEntity},
    user,
};
use crate::domain::{Campaign, CampaignDetails, CampaignStatus};
use crate::errors::{AppError, AppResult};

/// Creation parameters for a campaign
#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub title: String,
    pub description: String,
    pub target_amount_cents: i64,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
}

/// Update parameters; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct CampaignUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub target_amount_cents: Option<i64>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Campaign>>;

    /// Campaign joined with its creator's name
    async fn find_details(&self, id: Uuid) -> AppResult<Option<CampaignDetails>>;

    /// The campaign currently flagged as root, if any
    async fn find_root(&self) -> AppResult<Option<Campaign>>;

    async fn list(
        &self,
        offset: u64,
        limit: u64,
        status: Option<CampaignStatus>,
    ) -> AppResult<(Vec<CampaignDetails>, u64)>;

    async fn create(&self, campaign: NewCampaign) -> AppResult<Campaign>;

    async fn update(&self, id: Uuid, update: CampaignUpdate) -> AppResult<Campaign>;

    async fn set_status(&self, id: Uuid, status: CampaignStatus) -> AppResult<Campaign>;

    /// Flip the root flag on one campaign. This is a single-row write;
    /// clearing the previous root is a separate call.
    async fn set_is_root(&self, id: Uuid, is_root: bool) -> AppResult<()>;

    async fn add_to_current_amount(&self, id: Uuid, amount_cents: i64) -> AppResult<()>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed implementation of [`CampaignRepository`]
pub struct CampaignStore {
    db: DatabaseConnection,
}

impl CampaignStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn details(model: campaign::Model, creator: Option<user::Model>) -> CampaignDetails {
        CampaignDetails {
            id: model.id,
            title: model.title,
            description: model.description,
            target_amount_cents: model.target_amount_cents,
            current_amount_cents: model.current_amount_cents,
            starts_at: model.starts_at,
            ends_at: model.ends_at,
            status: CampaignStatus::from(model.status.as_str()),
            is_root: model.is_root,
            created_by: model.created_by,
            created_by_name: creator.map(|u| u.full_name),
            created_at: model.created_at,
        }
    }

    async fn require(&self, id: Uuid) -> AppResult<campaign::Model> {
        CampaignEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl CampaignRepository for CampaignStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Campaign>> {
        let result = CampaignEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Campaign::from))
    }

    async fn find_details(&self, id: Uuid) -> AppResult<Option<CampaignDetails>> {
        let result = CampaignEntity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?;

        Ok(result.map(|(model, creator)| Self::details(model, creator)))
    }

    async fn find_root(&self) -> AppResult<Option<Campaign>> {
        let result = CampaignEntity::find()
            .filter(campaign::Column::IsRoot.eq(true))
            .one(&self.db)
            .await?;

        Ok(result.map(Campaign::from))
    }

    async fn list(
        &self,
        offset: u64,
        limit: u64,
        status: Option<CampaignStatus>,
    ) -> AppResult<(Vec<CampaignDetails>, u64)> {
        let mut query = CampaignEntity::find()
            .find_also_related(user::Entity)
            .order_by_desc(campaign::Column::CreatedAt);

        if let Some(status) = status {
            query = query.filter(campaign::Column::Status.eq(status.to_string()));
        }

        let paginator = query.paginate(&self.db, limit.max(1));
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(offset / limit.max(1)).await?;

        let details = rows
            .into_iter()
            .map(|(model, creator)| Self::details(model, creator))
            .collect();

        Ok((details, total))
    }

    async fn create(&self, new: NewCampaign) -> AppResult<Campaign> {
        let now = Utc::now();
        let active_model = campaign::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new.title),
            description: Set(new.description),
            target_amount_cents: Set(new.target_amount_cents),
            current_amount_cents: Set(0),
            starts_at: Set(new.starts_at),
            ends_at: Set(new.ends_at),
            status: Set(CampaignStatus::Draft.to_string()),
            created_by: Set(new.created_by),
            is_root: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Campaign::from(model))
    }

    async fn update(&self, id: Uuid, update: CampaignUpdate) -> AppResult<Campaign> {
        let model = self.require(id).await?;

        let mut active: campaign::ActiveModel = model.into();
        if let Some(title) = update.title {
            active.title = Set(title);
        }
        if let Some(description) = update.description {
            active.description = Set(description);
        }
        if let Some(target) = update.target_amount_cents {
            active.target_amount_cents = Set(target);
        }
        if let Some(starts_at) = update.starts_at {
            active.starts_at = Set(starts_at);
        }
        if let Some(ends_at) = update.ends_at {
            active.ends_at = Set(Some(ends_at));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Campaign::from(model))
    }

    async fn set_status(&self, id: Uuid, status: CampaignStatus) -> AppResult<Campaign> {
        let model = self.require(id).await?;

        let mut active: campaign::ActiveModel = model.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Campaign::from(model))
    }

    async fn set_is_root(&self, id: Uuid, is_root: bool) -> AppResult<()> {
        let model = self.require(id).await?;

        let mut active: campaign::ActiveModel = model.into();
        active.is_root = Set(is_root);
        active.updated_at = Set(Utc::now());

        active.update(&self.db).await?;
        Ok(())
    }

    async fn add_to_current_amount(&self, id: Uuid, amount_cents: i64) -> AppResult<()> {
        let model = self.require(id).await?;

        let current = model.current_amount_cents;
        let mut active: campaign::ActiveModel = model.into();
        active.current_amount_cents = Set(current + amount_cents);
        active.updated_at = Set(Utc::now());

        active.update(&self.db).await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = CampaignEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
