//! Donor service.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Actor, DonorListItem, DonorProfile, Gender, Password, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{DonorUpdate, NewDonor, NewUser};
use crate::infra::UnitOfWork;
use crate::types::{PageRequest, Paginated};

/// Registration input for a new donor account
#[derive(Debug, Clone)]
pub struct RegisterDonor {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub phone: String,
    pub cpf: String,
}

/// Profile update input; name goes to the user row, the rest to the donor row
#[derive(Debug, Clone, Default)]
pub struct UpdateDonorProfile {
    pub full_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
}

/// Donor service trait for dependency injection.
#[async_trait]
pub trait DonorService: Send + Sync {
    /// Self-registration; the account starts with the donor role
    async fn register(&self, input: RegisterDonor) -> AppResult<DonorProfile>;

    /// Paginated donor listing with lifetime donated totals attached
    async fn list(&self, page: PageRequest) -> AppResult<Paginated<DonorListItem>>;

    /// Fetch one donor; donors may only read their own profile
    async fn get(&self, id: Uuid, actor: Actor) -> AppResult<DonorProfile>;

    /// Update one donor; donors may only update their own profile
    async fn update(&self, id: Uuid, actor: Actor, input: UpdateDonorProfile)
        -> AppResult<DonorProfile>;

    /// Soft delete the donor's user account
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of DonorService using Unit of Work.
pub struct DonorManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DonorManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Donors may only touch their own record; admins may touch any.
    async fn authorize(&self, profile: &DonorProfile, actor: Actor) -> AppResult<()> {
        if actor.is_admin() || profile.user_id == actor.user_id {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> DonorService for DonorManager<U> {
    async fn register(&self, input: RegisterDonor) -> AppResult<DonorProfile> {
        // Check for existing accounts including soft-deleted ones so a
        // removed email cannot be reused
        if self
            .uow
            .users()
            .find_by_email_with_deleted(&input.email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("User"));
        }

        let password_hash = Password::new(&input.password)?.into_string();

        let user = self
            .uow
            .users()
            .create(NewUser {
                full_name: input.full_name,
                email: input.email,
                password_hash,
                role: UserRole::Donor,
            })
            .await?;

        let donor = self
            .uow
            .donors()
            .create(NewDonor {
                user_id: user.id,
                birth_date: input.birth_date,
                gender: input.gender,
                phone: input.phone,
                cpf: input.cpf,
            })
            .await?;

        Ok(DonorProfile {
            id: donor.id,
            user_id: user.id,
            full_name: user.full_name,
            email: user.email,
            birth_date: donor.birth_date,
            gender: donor.gender,
            phone: donor.phone,
            cpf: donor.cpf,
            created_at: user.created_at,
        })
    }

    async fn list(&self, page: PageRequest) -> AppResult<Paginated<DonorListItem>> {
        let (profiles, total) = self
            .uow
            .donors()
            .list(page.offset(), page.limit())
            .await?;

        let mut items = Vec::with_capacity(profiles.len());
        for profile in profiles {
            let total_donated = self
                .uow
                .donors()
                .total_amount_donated_by_donor_id(profile.id)
                .await?;

            items.push(DonorListItem {
                profile,
                total_donated,
            });
        }

        Ok(Paginated::new(items, page.page, page.limit(), total))
    }

    async fn get(&self, id: Uuid, actor: Actor) -> AppResult<DonorProfile> {
        let profile = self
            .uow
            .donors()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.authorize(&profile, actor).await?;
        Ok(profile)
    }

    async fn update(
        &self,
        id: Uuid,
        actor: Actor,
        input: UpdateDonorProfile,
    ) -> AppResult<DonorProfile> {
        let profile = self
            .uow
            .donors()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.authorize(&profile, actor).await?;

        if let Some(full_name) = input.full_name {
            self.uow
                .users()
                .update_full_name(profile.user_id, full_name)
                .await?;
        }

        self.uow
            .donors()
            .update(
                id,
                DonorUpdate {
                    birth_date: input.birth_date,
                    gender: input.gender,
                    phone: input.phone,
                },
            )
            .await?;

        self.uow
            .donors()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let profile = self
            .uow
            .donors()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.uow.users().soft_delete(profile.user_id).await
    }
}
