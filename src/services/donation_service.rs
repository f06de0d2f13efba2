//! Donation service.
//!
//! Donation creation is the one flow that runs inside a storage
//! transaction: the donation row, its pending payment, and the campaign
//! total move together or not at all.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Actor, DonationDetails, Payment, PaymentMethod, Periodicity};
use crate::errors::{AppError, AppResult};
use crate::infra::{NewDonation, UnitOfWork};
use crate::types::{PageRequest, Paginated};

/// Creation input for a donation
#[derive(Debug, Clone)]
pub struct CreateDonation {
    pub amount_cents: i64,
    pub periodicity: Option<Periodicity>,
    pub campaign_id: Option<Uuid>,
    pub payment_method: PaymentMethod,
}

/// Donation service trait for dependency injection.
#[async_trait]
pub trait DonationService: Send + Sync {
    /// Create a donation with its pending payment for the acting donor
    async fn create(&self, actor: Actor, input: CreateDonation) -> AppResult<DonationDetails>;

    /// Fetch one donation; donors may only read their own
    async fn get(&self, id: Uuid, actor: Actor) -> AppResult<DonationDetails>;

    /// All donations, newest first
    async fn list(&self, page: PageRequest) -> AppResult<Paginated<DonationDetails>>;

    /// The acting donor's donations, newest first
    async fn list_mine(
        &self,
        actor: Actor,
        page: PageRequest,
    ) -> AppResult<Paginated<DonationDetails>>;
}

/// Concrete implementation of DonationService using Unit of Work.
pub struct DonationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DonationManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn donor_id_for(&self, actor: Actor) -> AppResult<Uuid> {
        let donor = self
            .uow
            .donors()
            .find_by_user_id(actor.user_id)
            .await?
            .ok_or(AppError::NotFound)?;

        Ok(donor.id)
    }
}

#[async_trait]
impl<U: UnitOfWork> DonationService for DonationManager<U> {
    async fn create(&self, actor: Actor, input: CreateDonation) -> AppResult<DonationDetails> {
        if input.amount_cents <= 0 {
            return Err(AppError::bad_request("Donation amount must be positive"));
        }

        let donor_id = self.donor_id_for(actor).await?;

        // Validate the campaign before opening the transaction
        if let Some(campaign_id) = input.campaign_id {
            self.uow
                .campaigns()
                .find_by_id(campaign_id)
                .await?
                .ok_or(AppError::NotFound)?;
        }

        let amount_cents = input.amount_cents;
        let method = input.payment_method;
        let new_donation = NewDonation {
            donor_id,
            campaign_id: input.campaign_id,
            amount_cents,
            periodicity: input.periodicity,
        };

        let (donation, payment) = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let donation = ctx.donations().create(new_donation).await?;
                    let payment = ctx
                        .payments()
                        .create(donation.id, method, amount_cents)
                        .await?;

                    if let Some(campaign_id) = donation.campaign_id {
                        ctx.campaigns()
                            .add_to_current_amount(campaign_id, amount_cents)
                            .await?;
                    }

                    Ok((donation, payment))
                })
            })
            .await?;

        Ok(details_of(donation, vec![payment]))
    }

    async fn get(&self, id: Uuid, actor: Actor) -> AppResult<DonationDetails> {
        let details = self
            .uow
            .donations()
            .find_details(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !actor.is_admin() {
            let donor_id = self.donor_id_for(actor).await?;
            if details.donor_id != donor_id {
                return Err(AppError::Forbidden);
            }
        }

        Ok(details)
    }

    async fn list(&self, page: PageRequest) -> AppResult<Paginated<DonationDetails>> {
        let (details, total) = self
            .uow
            .donations()
            .list(page.offset(), page.limit())
            .await?;

        Ok(Paginated::new(details, page.page, page.limit(), total))
    }

    async fn list_mine(
        &self,
        actor: Actor,
        page: PageRequest,
    ) -> AppResult<Paginated<DonationDetails>> {
        let donor_id = self.donor_id_for(actor).await?;

        let (details, total) = self
            .uow
            .donations()
            .list_by_donor(donor_id, page.offset(), page.limit())
            .await?;

        Ok(Paginated::new(details, page.page, page.limit(), total))
    }
}

fn details_of(donation: crate::domain::Donation, payments: Vec<Payment>) -> DonationDetails {
    DonationDetails {
        id: donation.id,
        donor_id: donation.donor_id,
        campaign_id: donation.campaign_id,
        amount_cents: donation.amount_cents,
        periodicity: donation.periodicity,
        created_at: donation.created_at,
        payments,
    }
}
