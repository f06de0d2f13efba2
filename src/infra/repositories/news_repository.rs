//! News repository.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::news::{self, Entity as NewsEntity};
use crate::domain::News;
use crate::errors::{AppError, AppResult};

/// Creation parameters for a news entry
#[derive(Debug, Clone)]
pub struct NewNews {
    pub title: String,
    pub description: String,
    pub published_on: NaiveDate,
    pub url: Option<String>,
}

/// Update parameters; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct NewsUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_on: Option<NaiveDate>,
    pub url: Option<String>,
}

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait NewsRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<News>>;

    async fn list(&self, offset: u64, limit: u64) -> AppResult<(Vec<News>, u64)>;

    async fn create(&self, news: NewNews) -> AppResult<News>;

    async fn update(&self, id: Uuid, update: NewsUpdate) -> AppResult<News>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed implementation of [`NewsRepository`]
pub struct NewsStore {
    db: DatabaseConnection,
}

impl NewsStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NewsRepository for NewsStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<News>> {
        let result = NewsEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(News::from))
    }

    async fn list(&self, offset: u64, limit: u64) -> AppResult<(Vec<News>, u64)> {
        let paginator = NewsEntity::find()
            .order_by_desc(news::Column::PublishedOn)
            .paginate(&self.db, limit.max(1));

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(offset / limit.max(1)).await?;

        Ok((models.into_iter().map(News::from).collect(), total))
    }

    async fn create(&self, new: NewNews) -> AppResult<News> {
        let now = Utc::now();
        let active_model = news::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new.title),
            description: Set(new.description),
            published_on: Set(new.published_on),
            url: Set(new.url),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(News::from(model))
    }

    async fn update(&self, id: Uuid, update: NewsUpdate) -> AppResult<News> {
        let model = NewsEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: news::ActiveModel = model.into();
        if let Some(title) = update.title {
            active.title = Set(title);
        }
        if let Some(description) = update.description {
            active.description = Set(description);
        }
        if let Some(published_on) = update.published_on {
            active.published_on = Set(published_on);
        }
        if let Some(url) = update.url {
            active.url = Set(Some(url));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(News::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = NewsEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
