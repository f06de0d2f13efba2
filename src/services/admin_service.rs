//! Admin service.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{AdminProfile, Password, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::NewUser;
use crate::infra::UnitOfWork;
use crate::types::{PageRequest, Paginated};

/// Creation input for a new administrator account
#[derive(Debug, Clone)]
pub struct CreateAdmin {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Admin service trait for dependency injection.
#[async_trait]
pub trait AdminService: Send + Sync {
    /// Create an administrator; only reachable by existing admins
    async fn create(&self, input: CreateAdmin) -> AppResult<AdminProfile>;

    async fn list(&self, page: PageRequest) -> AppResult<Paginated<AdminProfile>>;

    async fn get(&self, id: Uuid) -> AppResult<AdminProfile>;

    /// Rename an administrator
    async fn update_name(&self, id: Uuid, full_name: String) -> AppResult<AdminProfile>;

    /// Soft delete the admin's user account
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of AdminService using Unit of Work.
pub struct AdminManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AdminManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AdminService for AdminManager<U> {
    async fn create(&self, input: CreateAdmin) -> AppResult<AdminProfile> {
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
                role: UserRole::Admin,
            })
            .await?;

        let admin = self.uow.admins().create(user.id, false).await?;

        Ok(AdminProfile {
            id: admin.id,
            user_id: user.id,
            full_name: user.full_name,
            email: user.email,
            is_root: admin.is_root,
            created_at: user.created_at,
        })
    }

    async fn list(&self, page: PageRequest) -> AppResult<Paginated<AdminProfile>> {
        let (profiles, total) = self
            .uow
            .admins()
            .list(page.offset(), page.limit())
            .await?;

        Ok(Paginated::new(profiles, page.page, page.limit(), total))
    }

    async fn get(&self, id: Uuid) -> AppResult<AdminProfile> {
        self.uow
            .admins()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn update_name(&self, id: Uuid, full_name: String) -> AppResult<AdminProfile> {
        let profile = self
            .uow
            .admins()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.uow
            .users()
            .update_full_name(profile.user_id, full_name)
            .await?;

        self.uow
            .admins()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let profile = self
            .uow
            .admins()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.uow.users().soft_delete(profile.user_id).await
    }
}
