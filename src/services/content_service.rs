//! Content services: events, news, how-to-help entries.
//!
//! Plain CRUD orchestration; writes are admin-gated at the route layer.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Event, HowToHelp, News};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{
    EventUpdate, HowToHelpUpdate, NewEvent, NewHowToHelp, NewNews, NewsUpdate,
};
use crate::infra::UnitOfWork;
use crate::types::{PageRequest, Paginated};

/// Event service trait for dependency injection.
#[async_trait]
pub trait EventService: Send + Sync {
    async fn create(&self, input: NewEvent) -> AppResult<Event>;
    async fn list(&self, page: PageRequest) -> AppResult<Paginated<Event>>;
    async fn get(&self, id: Uuid) -> AppResult<Event>;
    async fn update(&self, id: Uuid, input: EventUpdate) -> AppResult<Event>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// News service trait for dependency injection.
#[async_trait]
pub trait NewsService: Send + Sync {
    async fn create(&self, input: NewNews) -> AppResult<News>;
    async fn list(&self, page: PageRequest) -> AppResult<Paginated<News>>;
    async fn get(&self, id: Uuid) -> AppResult<News>;
    async fn update(&self, id: Uuid, input: NewsUpdate) -> AppResult<News>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// How-to-help service trait for dependency injection.
#[async_trait]
pub trait HowToHelpService: Send + Sync {
    async fn create(&self, input: NewHowToHelp) -> AppResult<HowToHelp>;
    async fn list(&self, page: PageRequest) -> AppResult<Paginated<HowToHelp>>;
    async fn get(&self, id: Uuid) -> AppResult<HowToHelp>;
    async fn update(&self, id: Uuid, input: HowToHelpUpdate) -> AppResult<HowToHelp>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of the content services using Unit of Work.
pub struct ContentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ContentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> EventService for ContentManager<U> {
    async fn create(&self, input: NewEvent) -> AppResult<Event> {
        self.uow.events().create(input).await
    }

    async fn list(&self, page: PageRequest) -> AppResult<Paginated<Event>> {
        let (events, total) = self.uow.events().list(page.offset(), page.limit()).await?;
        Ok(Paginated::new(events, page.page, page.limit(), total))
    }

    async fn get(&self, id: Uuid) -> AppResult<Event> {
        self.uow
            .events()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn update(&self, id: Uuid, input: EventUpdate) -> AppResult<Event> {
        self.uow.events().update(id, input).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.events().delete(id).await
    }
}

#[async_trait]
impl<U: UnitOfWork> NewsService for ContentManager<U> {
    async fn create(&self, input: NewNews) -> AppResult<News> {
        self.uow.news().create(input).await
    }

    async fn list(&self, page: PageRequest) -> AppResult<Paginated<News>> {
        let (news, total) = self.uow.news().list(page.offset(), page.limit()).await?;
        Ok(Paginated::new(news, page.page, page.limit(), total))
    }

    async fn get(&self, id: Uuid) -> AppResult<News> {
        self.uow
            .news()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn update(&self, id: Uuid, input: NewsUpdate) -> AppResult<News> {
        self.uow.news().update(id, input).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.news().delete(id).await
    }
}

#[async_trait]
impl<U: UnitOfWork> HowToHelpService for ContentManager<U> {
    async fn create(&self, input: NewHowToHelp) -> AppResult<HowToHelp> {
        self.uow.how_to_help().create(input).await
    }

    async fn list(&self, page: PageRequest) -> AppResult<Paginated<HowToHelp>> {
        let (entries, total) = self
            .uow
            .how_to_help()
            .list(page.offset(), page.limit())
            .await?;
        Ok(Paginated::new(entries, page.page, page.limit(), total))
    }

    async fn get(&self, id: Uuid) -> AppResult<HowToHelp> {
        self.uow
            .how_to_help()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn update(&self, id: Uuid, input: HowToHelpUpdate) -> AppResult<HowToHelp> {
        self.uow.how_to_help().update(id, input).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.uow.how_to_help().delete(id).await
    }
}
