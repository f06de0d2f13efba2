//! How-to-help repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::how_to_help::{self, Entity as HowToHelpEntity};
use crate::domain::HowToHelp;
use crate::errors::{AppError, AppResult};

/// Creation parameters for a how-to-help entry
#[derive(Debug, Clone)]
pub struct NewHowToHelp {
    pub title: String,
    pub description: String,
    pub url: Option<String>,
}

/// Update parameters; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct HowToHelpUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait HowToHelpRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<HowToHelp>>;

    async fn list(&self, offset: u64, limit: u64) -> AppResult<(Vec<HowToHelp>, u64)>;

    async fn create(&self, entry: NewHowToHelp) -> AppResult<HowToHelp>;

    async fn update(&self, id: Uuid, update: HowToHelpUpdate) -> AppResult<HowToHelp>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed implementation of [`HowToHelpRepository`]
pub struct HowToHelpStore {
    db: DatabaseConnection,
}

impl HowToHelpStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HowToHelpRepository for HowToHelpStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<HowToHelp>> {
        let result = HowToHelpEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(HowToHelp::from))
    }

    async fn list(&self, offset: u64, limit: u64) -> AppResult<(Vec<HowToHelp>, u64)> {
        let paginator = HowToHelpEntity::find()
            .order_by_asc(how_to_help::Column::CreatedAt)
            .paginate(&self.db, limit.max(1));

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(offset / limit.max(1)).await?;

        Ok((models.into_iter().map(HowToHelp::from).collect(), total))
    }

    async fn create(&self, new: NewHowToHelp) -> AppResult<HowToHelp> {
        let now = Utc::now();
        let active_model = how_to_help::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new.title),
            description: Set(new.description),
            url: Set(new.url),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(HowToHelp::from(model))
    }

    async fn update(&self, id: Uuid, update: HowToHelpUpdate) -> AppResult<HowToHelp> {
        let model = HowToHelpEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: how_to_help::ActiveModel = model.into();
        if let Some(title) = update.title {
            active.title = Set(title);
        }
        if let Some(description) = update.description {
            active.description = Set(description);
        }
        if let Some(url) = update.url {
            active.url = Set(Some(url));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(HowToHelp::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = HowToHelpEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
