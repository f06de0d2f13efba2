//! Donor service tests: registration conflicts, listing totals and
//! profile ownership.

mod common;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use givehub::domain::{Actor, Donor, DonorProfile, Gender, Password, User, UserRole};
use givehub::errors::{AppError, AppResult};
use givehub::infra::repositories::{DonorRepository, DonorUpdate, NewDonor, NewUser};
use givehub::infra::UserRepository;
use givehub::services::{DonorManager, DonorService, RegisterDonor};
use givehub::types::PageRequest;

use common::TestUnitOfWork;

fn birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 4, 12).unwrap()
}

fn profile(donor_id: Uuid, user_id: Uuid) -> DonorProfile {
    DonorProfile {
        id: donor_id,
        user_id,
        full_name: "Maria Silva".to_string(),
        email: "maria@example.com".to_string(),
        birth_date: birth_date(),
        gender: Gender::Female,
        phone: "+55 11 91234-5678".to_string(),
        cpf: "12345678909".to_string(),
        created_at: Utc::now(),
    }
}

/// User repository fake pretending the email is already taken
struct TakenEmailUserRepository;

#[async_trait]
impl UserRepository for TakenEmailUserRepository {
    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<User>> {
        Ok(None)
    }

    async fn find_by_email(&self, _email: &str) -> AppResult<Option<User>> {
        Ok(None)
    }

    async fn find_by_email_with_deleted(&self, email: &str) -> AppResult<Option<User>> {
        let now = Utc::now();
        Ok(Some(User {
            id: Uuid::new_v4(),
            full_name: "Existing".to_string(),
            email: email.to_string(),
            password_hash: Password::new("Existing123!").unwrap().into_string(),
            role: UserRole::Donor,
            created_at: now,
            updated_at: now,
            deleted_at: Some(now),
        }))
    }

    async fn create(&self, _user: NewUser) -> AppResult<User> {
        unimplemented!("registration must stop at the conflict")
    }

    async fn update_full_name(&self, _id: Uuid, _full_name: String) -> AppResult<User> {
        unimplemented!("not used by these tests")
    }

    async fn update_password(&self, _id: Uuid, _password_hash: String) -> AppResult<()> {
        unimplemented!("not used by these tests")
    }

    async fn soft_delete(&self, _id: Uuid) -> AppResult<()> {
        unimplemented!("not used by these tests")
    }
}

/// Donor repository fake with fixed profiles and per-donor totals
struct StubDonorRepository {
    profiles: Vec<DonorProfile>,
    totals: Mutex<Vec<(Uuid, i64)>>,
}

impl StubDonorRepository {
    fn new(profiles: Vec<DonorProfile>) -> Self {
        Self {
            profiles,
            totals: Mutex::new(Vec::new()),
        }
    }

    fn with_total(self, donor_id: Uuid, total: i64) -> Self {
        self.totals.lock().unwrap().push((donor_id, total));
        self
    }
}

#[async_trait]
impl DonorRepository for StubDonorRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DonorProfile>> {
        Ok(self.profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<Donor>> {
        Ok(self
            .profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .map(|p| Donor {
                id: p.id,
                user_id: p.user_id,
                birth_date: p.birth_date,
                gender: p.gender,
                phone: p.phone.clone(),
                cpf: p.cpf.clone(),
            }))
    }

    async fn list(&self, _offset: u64, limit: u64) -> AppResult<(Vec<DonorProfile>, u64)> {
        let total = self.profiles.len() as u64;
        Ok((
            self.profiles.iter().take(limit as usize).cloned().collect(),
            total,
        ))
    }

    async fn create(&self, _donor: NewDonor) -> AppResult<Donor> {
        unimplemented!("not used by these tests")
    }

    async fn update(&self, _id: Uuid, _update: DonorUpdate) -> AppResult<Donor> {
        unimplemented!("not used by these tests")
    }

    async fn total_amount_donated_by_donor_id(&self, donor_id: Uuid) -> AppResult<i64> {
        // Donors with no recorded donations report zero, never an error
        Ok(self
            .totals
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| *id == donor_id)
            .map(|(_, total)| *total)
            .unwrap_or(0))
    }
}

#[tokio::test]
async fn registration_with_a_taken_email_is_a_conflict() {
    let uow = TestUnitOfWork::new().with_users(Arc::new(TakenEmailUserRepository));
    let service = DonorManager::new(Arc::new(uow));

    let result = service
        .register(RegisterDonor {
            full_name: "Maria Silva".to_string(),
            email: "maria@example.com".to_string(),
            password: "SecurePass123!".to_string(),
            birth_date: birth_date(),
            gender: Gender::Female,
            phone: "+55 11 91234-5678".to_string(),
            cpf: "12345678909".to_string(),
        })
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn listing_attaches_zero_totals_for_donors_without_donations() {
    let rich = profile(Uuid::new_v4(), Uuid::new_v4());
    let newcomer = profile(Uuid::new_v4(), Uuid::new_v4());
    let rich_id = rich.id;
    let newcomer_id = newcomer.id;

    let donors = StubDonorRepository::new(vec![rich, newcomer]).with_total(rich_id, 120_000);

    let uow = TestUnitOfWork::new().with_donors(Arc::new(donors));
    let service = DonorManager::new(Arc::new(uow));

    let page = service.list(PageRequest::default()).await.unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.last_page, 1);

    let totals: Vec<_> = page
        .data
        .iter()
        .map(|item| (item.profile.id, item.total_donated))
        .collect();
    assert!(totals.contains(&(rich_id, 120_000)));
    assert!(totals.contains(&(newcomer_id, 0)));
}

#[tokio::test]
async fn a_donor_cannot_read_another_donors_profile() {
    let target = profile(Uuid::new_v4(), Uuid::new_v4());
    let target_id = target.id;

    let donors = StubDonorRepository::new(vec![target]);
    let uow = TestUnitOfWork::new().with_donors(Arc::new(donors));
    let service = DonorManager::new(Arc::new(uow));

    let stranger = Actor {
        user_id: Uuid::new_v4(),
        role: UserRole::Donor,
    };

    let result = service.get(target_id, stranger).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn a_donor_reads_their_own_profile_and_admins_read_any() {
    let user_id = Uuid::new_v4();
    let target = profile(Uuid::new_v4(), user_id);
    let target_id = target.id;

    let donors = StubDonorRepository::new(vec![target]);
    let uow = TestUnitOfWork::new().with_donors(Arc::new(donors));
    let service = DonorManager::new(Arc::new(uow));

    let owner = Actor {
        user_id,
        role: UserRole::Donor,
    };
    assert!(service.get(target_id, owner).await.is_ok());

    let admin = Actor {
        user_id: Uuid::new_v4(),
        role: UserRole::Admin,
    };
    assert!(service.get(target_id, admin).await.is_ok());
}
