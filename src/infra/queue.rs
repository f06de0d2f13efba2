//! Outbound mail queue port.
//!
//! Services enqueue email jobs through this trait; delivery, retries and
//! backoff belong entirely to the queue technology driven by the worker
//! process.

use apalis::prelude::Storage;
use apalis_sql::postgres::PostgresStorage;
use async_trait::async_trait;

use crate::errors::{AppError, AppResult};
use crate::jobs::EmailJob;

/// Queue port for outbound email.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait EmailQueue: Send + Sync {
    /// Enqueue a job for asynchronous delivery
    async fn enqueue(&self, job: EmailJob) -> AppResult<()>;
}

/// PostgreSQL-backed queue using apalis storage.
#[derive(Clone)]
pub struct PostgresEmailQueue {
    storage: PostgresStorage<EmailJob>,
}

impl PostgresEmailQueue {
    pub fn new(storage: PostgresStorage<EmailJob>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl EmailQueue for PostgresEmailQueue {
    async fn enqueue(&self, job: EmailJob) -> AppResult<()> {
        let mut storage = self.storage.clone();
        storage
            .push(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to enqueue email job: {}", e)))?;
        Ok(())
    }
}
