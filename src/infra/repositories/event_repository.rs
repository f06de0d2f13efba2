//! Event repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::event::{self, Entity as EventEntity};
use crate::domain::Event;
use crate::errors::{AppError, AppResult};

/// Creation parameters for an event
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub location: String,
    pub url: Option<String>,
}

/// Update parameters; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub url: Option<String>,
}

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>>;

    async fn list(&self, offset: u64, limit: u64) -> AppResult<(Vec<Event>, u64)>;

    async fn create(&self, event: NewEvent) -> AppResult<Event>;

    async fn update(&self, id: Uuid, update: EventUpdate) -> AppResult<Event>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed implementation of [`EventRepository`]
pub struct EventStore {
    db: DatabaseConnection,
}

impl EventStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventRepository for EventStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Event>> {
        let result = EventEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Event::from))
    }

    async fn list(&self, offset: u64, limit: u64) -> AppResult<(Vec<Event>, u64)> {
        let paginator = EventEntity::find()
            .order_by_desc(event::Column::StartsAt)
            .paginate(&self.db, limit.max(1));

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(offset / limit.max(1)).await?;

        Ok((models.into_iter().map(Event::from).collect(), total))
    }

    async fn create(&self, new: NewEvent) -> AppResult<Event> {
        let now = Utc::now();
        let active_model = event::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new.title),
            description: Set(new.description),
            starts_at: Set(new.starts_at),
            ends_at: Set(new.ends_at),
            location: Set(new.location),
            url: Set(new.url),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Event::from(model))
    }

    async fn update(&self, id: Uuid, update: EventUpdate) -> AppResult<Event> {
        let model = EventEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: event::ActiveModel = model.into();
        if let Some(title) = update.title {
            active.title = Set(title);
        }
        if let Some(description) = update.description {
            active.description = Set(description);
        }
        if let Some(starts_at) = update.starts_at {
            active.starts_at = Set(starts_at);
        }
        if let Some(ends_at) = update.ends_at {
            active.ends_at = Set(Some(ends_at));
        }
        if let Some(location) = update.location {
            active.location = Set(location);
        }
        if let Some(url) = update.url {
            active.url = Set(Some(url));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Event::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = EventEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
