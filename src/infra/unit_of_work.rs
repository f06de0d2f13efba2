//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and owns the one transactional primitive
//! in the system. Donation creation is the only flow that needs multiple
//! writes to land atomically (donation + payment + campaign amount), and it
//! runs through [`UnitOfWork::transaction`].

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    AccessMode, ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IsolationLevel, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::{campaign, donation, payment};
use super::repositories::{
    AdminRepository, AdminStore, CampaignRepository, CampaignStore, DonationRepository,
    DonationStore, DonorRepository, DonorStore, EventRepository, EventStore, HowToHelpRepository,
    HowToHelpStore, MetricsRepository, MetricsStore, NewsRepository, NewsStore,
    NewsletterRepository, NewsletterStore, PasswordResetTokenRepository, PasswordResetTokenStore,
    UserRepository, UserStore,
};
use crate::domain::{Donation, Payment, PaymentMethod, PaymentStatus, Periodicity};
use crate::errors::{AppError, AppResult};

/// Creation parameters for a donation row, only usable inside a transaction
#[derive(Debug, Clone)]
pub struct NewDonation {
    pub donor_id: Uuid,
    pub campaign_id: Option<Uuid>,
    pub amount_cents: i64,
    pub periodicity: Option<Periodicity>,
}

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction
/// management. Not mockable directly because of the generic transaction
/// method; tests wrap individual repository mocks instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;
    fn donors(&self) -> Arc<dyn DonorRepository>;
    fn admins(&self) -> Arc<dyn AdminRepository>;
    fn campaigns(&self) -> Arc<dyn CampaignRepository>;
    fn donations(&self) -> Arc<dyn DonationRepository>;
    fn events(&self) -> Arc<dyn EventRepository>;
    fn news(&self) -> Arc<dyn NewsRepository>;
    fn how_to_help(&self) -> Arc<dyn HowToHelpRepository>;
    fn newsletter(&self) -> Arc<dyn NewsletterRepository>;
    fn reset_tokens(&self) -> Arc<dyn PasswordResetTokenRepository>;
    fn metrics(&self) -> Arc<dyn MetricsRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is automatically committed on success or rolled back
    /// on error. Uses ReadCommitted isolation.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All writes performed through this context are part of the same database
/// transaction. The context borrows the transaction to ensure proper
/// lifetime management.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get donation writes for this transaction
    pub fn donations(&self) -> TxDonationRepository<'_> {
        TxDonationRepository { txn: self.txn }
    }

    /// Get payment writes for this transaction
    pub fn payments(&self) -> TxPaymentRepository<'_> {
        TxPaymentRepository { txn: self.txn }
    }

    /// Get campaign writes for this transaction
    pub fn campaigns(&self) -> TxCampaignRepository<'_> {
        TxCampaignRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    users: Arc<UserStore>,
    donors: Arc<DonorStore>,
    admins: Arc<AdminStore>,
    campaigns: Arc<CampaignStore>,
    donations: Arc<DonationStore>,
    events: Arc<EventStore>,
    news: Arc<NewsStore>,
    how_to_help: Arc<HowToHelpStore>,
    newsletter: Arc<NewsletterStore>,
    reset_tokens: Arc<PasswordResetTokenStore>,
    metrics: Arc<MetricsStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            donors: Arc::new(DonorStore::new(db.clone())),
            admins: Arc::new(AdminStore::new(db.clone())),
            campaigns: Arc::new(CampaignStore::new(db.clone())),
            donations: Arc::new(DonationStore::new(db.clone())),
            events: Arc::new(EventStore::new(db.clone())),
            news: Arc::new(NewsStore::new(db.clone())),
            how_to_help: Arc::new(HowToHelpStore::new(db.clone())),
            newsletter: Arc::new(NewsletterStore::new(db.clone())),
            reset_tokens: Arc::new(PasswordResetTokenStore::new(db.clone())),
            metrics: Arc::new(MetricsStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn donors(&self) -> Arc<dyn DonorRepository> {
        self.donors.clone()
    }

    fn admins(&self) -> Arc<dyn AdminRepository> {
        self.admins.clone()
    }

    fn campaigns(&self) -> Arc<dyn CampaignRepository> {
        self.campaigns.clone()
    }

    fn donations(&self) -> Arc<dyn DonationRepository> {
        self.donations.clone()
    }

    fn events(&self) -> Arc<dyn EventRepository> {
        self.events.clone()
    }

    fn news(&self) -> Arc<dyn NewsRepository> {
        self.news.clone()
    }

    fn how_to_help(&self) -> Arc<dyn HowToHelpRepository> {
        self.how_to_help.clone()
    }

    fn newsletter(&self) -> Arc<dyn NewsletterRepository> {
        self.newsletter.clone()
    }

    fn reset_tokens(&self) -> Arc<dyn PasswordResetTokenRepository> {
        self.reset_tokens.clone()
    }

    fn metrics(&self) -> Arc<dyn MetricsRepository> {
        self.metrics.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-scoped donation writes
pub struct TxDonationRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxDonationRepository<'a> {
    pub async fn create(&self, new: NewDonation) -> AppResult<Donation> {
        let active_model = donation::ActiveModel {
            id: Set(Uuid::new_v4()),
            donor_id: Set(new.donor_id),
            campaign_id: Set(new.campaign_id),
            amount_cents: Set(new.amount_cents),
            periodicity: Set(new.periodicity.map(|p| p.to_string())),
            created_at: Set(Utc::now()),
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(Donation::from(model))
    }
}

/// Transaction-scoped payment writes
pub struct TxPaymentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxPaymentRepository<'a> {
    pub async fn create(
        &self,
        donation_id: Uuid,
        method: PaymentMethod,
        amount_cents: i64,
    ) -> AppResult<Payment> {
        let active_model = payment::ActiveModel {
            id: Set(Uuid::new_v4()),
            donation_id: Set(donation_id),
            method: Set(method.to_string()),
            status: Set(PaymentStatus::Pending.to_string()),
            amount_cents: Set(amount_cents),
            paid_at: Set(None),
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(Payment::from(model))
    }
}

/// Transaction-scoped campaign writes
pub struct TxCampaignRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxCampaignRepository<'a> {
    /// Add a freshly donated amount to the campaign's running total
    pub async fn add_to_current_amount(&self, id: Uuid, amount_cents: i64) -> AppResult<()> {
        let model = campaign::Entity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let current = model.current_amount_cents;
        let mut active: campaign::ActiveModel = model.into();
        active.current_amount_cents = Set(current + amount_cents);
        active.updated_at = Set(Utc::now());

        active.update(self.txn).await.map_err(AppError::from)?;
        Ok(())
    }
}
