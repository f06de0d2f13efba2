//! Donation service tests, focused on ownership checks and creation
//! preconditions.

mod common;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use givehub::domain::{
    Actor, Donation, DonationDetails, Donor, DonorProfile, Gender, PaymentMethod, UserRole,
};
use givehub::errors::{AppError, AppResult};
use givehub::infra::repositories::{DonationRepository, DonorRepository, DonorUpdate, NewDonor};
use givehub::services::{CreateDonation, DonationManager, DonationService};
use givehub::types::PageRequest;

use common::TestUnitOfWork;

/// Donor repository fake mapping one user to one donor id
struct StubDonorRepository {
    user_id: Uuid,
    donor_id: Uuid,
}

#[async_trait]
impl DonorRepository for StubDonorRepository {
    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<DonorProfile>> {
        unimplemented!("not used by these tests")
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<Donor>> {
        Ok((self.user_id == user_id).then(|| Donor {
            id: self.donor_id,
            user_id,
            birth_date: chrono::NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
            gender: Gender::Female,
            phone: "+55 11 91234-5678".to_string(),
            cpf: "12345678909".to_string(),
        }))
    }

    async fn list(&self, _offset: u64, _limit: u64) -> AppResult<(Vec<DonorProfile>, u64)> {
        unimplemented!("not used by these tests")
    }

    async fn create(&self, _donor: NewDonor) -> AppResult<Donor> {
        unimplemented!("not used by these tests")
    }

    async fn update(&self, _id: Uuid, _update: DonorUpdate) -> AppResult<Donor> {
        unimplemented!("not used by these tests")
    }

    async fn total_amount_donated_by_donor_id(&self, _donor_id: Uuid) -> AppResult<i64> {
        Ok(0)
    }
}

/// Donation repository fake holding a fixed set of donations
#[derive(Default)]
struct StubDonationRepository {
    donations: Mutex<Vec<DonationDetails>>,
}

impl StubDonationRepository {
    fn with(donations: Vec<DonationDetails>) -> Self {
        Self {
            donations: Mutex::new(donations),
        }
    }
}

#[async_trait]
impl DonationRepository for StubDonationRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Donation>> {
        Ok(self
            .donations
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .map(|d| Donation {
                id: d.id,
                donor_id: d.donor_id,
                campaign_id: d.campaign_id,
                amount_cents: d.amount_cents,
                periodicity: d.periodicity,
                created_at: d.created_at,
            }))
    }

    async fn find_details(&self, id: Uuid) -> AppResult<Option<DonationDetails>> {
        Ok(self
            .donations
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned())
    }

    async fn list(&self, _offset: u64, limit: u64) -> AppResult<(Vec<DonationDetails>, u64)> {
        let donations = self.donations.lock().unwrap();
        let total = donations.len() as u64;
        Ok((donations.iter().take(limit as usize).cloned().collect(), total))
    }

    async fn list_by_donor(
        &self,
        donor_id: Uuid,
        _offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<DonationDetails>, u64)> {
        let donations = self.donations.lock().unwrap();
        let mine: Vec<_> = donations
            .iter()
            .filter(|d| d.donor_id == donor_id)
            .cloned()
            .collect();
        let total = mine.len() as u64;
        Ok((mine.into_iter().take(limit as usize).collect(), total))
    }
}

fn donation_of(donor_id: Uuid) -> DonationDetails {
    DonationDetails {
        id: Uuid::new_v4(),
        donor_id,
        campaign_id: None,
        amount_cents: 5000,
        periodicity: None,
        created_at: Utc::now(),
        payments: vec![],
    }
}

fn donor_actor(user_id: Uuid) -> Actor {
    Actor {
        user_id,
        role: UserRole::Donor,
    }
}

#[tokio::test]
async fn a_donor_cannot_read_another_donors_donation() {
    let owner_donor_id = Uuid::new_v4();
    let donation = donation_of(owner_donor_id);
    let donation_id = donation.id;

    // The caller resolves to a different donor id
    let caller_user_id = Uuid::new_v4();
    let donors = Arc::new(StubDonorRepository {
        user_id: caller_user_id,
        donor_id: Uuid::new_v4(),
    });
    let donations = Arc::new(StubDonationRepository::with(vec![donation]));

    let uow = TestUnitOfWork::new()
        .with_donors(donors)
        .with_donations(donations);
    let service = DonationManager::new(Arc::new(uow));

    let result = service.get(donation_id, donor_actor(caller_user_id)).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn the_owning_donor_reads_their_donation() {
    let caller_user_id = Uuid::new_v4();
    let donor_id = Uuid::new_v4();
    let donation = donation_of(donor_id);
    let donation_id = donation.id;

    let donors = Arc::new(StubDonorRepository {
        user_id: caller_user_id,
        donor_id,
    });
    let donations = Arc::new(StubDonationRepository::with(vec![donation]));

    let uow = TestUnitOfWork::new()
        .with_donors(donors)
        .with_donations(donations);
    let service = DonationManager::new(Arc::new(uow));

    let details = service
        .get(donation_id, donor_actor(caller_user_id))
        .await
        .unwrap();

    assert_eq!(details.donor_id, donor_id);
}

#[tokio::test]
async fn admins_read_any_donation() {
    let donation = donation_of(Uuid::new_v4());
    let donation_id = donation.id;
    let donations = Arc::new(StubDonationRepository::with(vec![donation]));

    let uow = TestUnitOfWork::new().with_donations(donations);
    let service = DonationManager::new(Arc::new(uow));

    let admin = Actor {
        user_id: Uuid::new_v4(),
        role: UserRole::Admin,
    };

    assert!(service.get(donation_id, admin).await.is_ok());
}

#[tokio::test]
async fn creating_with_a_nonpositive_amount_is_rejected() {
    let uow = TestUnitOfWork::new();
    let service = DonationManager::new(Arc::new(uow));

    let result = service
        .create(
            donor_actor(Uuid::new_v4()),
            CreateDonation {
                amount_cents: 0,
                periodicity: None,
                campaign_id: None,
                payment_method: PaymentMethod::Pix,
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn creating_without_a_donor_profile_is_not_found() {
    let donors = Arc::new(StubDonorRepository {
        user_id: Uuid::new_v4(),
        donor_id: Uuid::new_v4(),
    });

    let uow = TestUnitOfWork::new().with_donors(donors);
    let service = DonationManager::new(Arc::new(uow));

    // A user id the donor repository does not know
    let result = service
        .create(
            donor_actor(Uuid::new_v4()),
            CreateDonation {
                amount_cents: 5000,
                periodicity: None,
                campaign_id: None,
                payment_method: PaymentMethod::Pix,
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn list_mine_only_returns_the_callers_donations_with_page_math() {
    let caller_user_id = Uuid::new_v4();
    let donor_id = Uuid::new_v4();

    let mut donations = vec![donation_of(Uuid::new_v4())];
    for _ in 0..3 {
        donations.push(donation_of(donor_id));
    }

    let donors = Arc::new(StubDonorRepository {
        user_id: caller_user_id,
        donor_id,
    });
    let donations = Arc::new(StubDonationRepository::with(donations));

    let uow = TestUnitOfWork::new()
        .with_donors(donors)
        .with_donations(donations);
    let service = DonationManager::new(Arc::new(uow));

    let page = service
        .list_mine(
            donor_actor(caller_user_id),
            PageRequest {
                page: 1,
                page_size: 2,
            },
        )
        .await
        .unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(page.last_page, 2);
    assert!(page.data.len() <= 2);
    assert!(page.data.iter().all(|d| d.donor_id == donor_id));
}
