//! Admin repository: administrator profiles.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use super::entities::{
    admin::{self, Entity as AdminEntity},
    user,
};
use crate::domain::{Admin, AdminProfile};
use crate::errors::AppResult;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AdminProfile>>;

    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<Admin>>;

    /// Page of admin profiles plus the total count of active admins
    async fn list(&self, offset: u64, limit: u64) -> AppResult<(Vec<AdminProfile>, u64)>;

    async fn create(&self, user_id: Uuid, is_root: bool) -> AppResult<Admin>;
}

/// SeaORM-backed implementation of [`AdminRepository`]
pub struct AdminStore {
    db: DatabaseConnection,
}

impl AdminStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn profile(admin: admin::Model, user: user::Model) -> AdminProfile {
        AdminProfile {
            id: admin.id,
            user_id: admin.user_id,
            full_name: user.full_name,
            email: user.email,
            is_root: admin.is_root,
            created_at: user.created_at,
        }
    }
}

#[async_trait]
impl AdminRepository for AdminStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AdminProfile>> {
        let result = AdminEntity::find_by_id(id)
            .find_also_related(user::Entity)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(result.and_then(|(admin, user)| user.map(|u| Self::profile(admin, u))))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<Admin>> {
        let result = AdminEntity::find()
            .filter(admin::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(result.map(Admin::from))
    }

    async fn list(&self, offset: u64, limit: u64) -> AppResult<(Vec<AdminProfile>, u64)> {
        let query = AdminEntity::find()
            .find_also_related(user::Entity)
            .filter(user::Column::DeletedAt.is_null());

        let paginator = query.paginate(&self.db, limit.max(1));
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(offset / limit.max(1)).await?;

        let profiles = rows
            .into_iter()
            .filter_map(|(admin, user)| user.map(|u| Self::profile(admin, u)))
            .collect();

        Ok((profiles, total))
    }

    async fn create(&self, user_id: Uuid, is_root: bool) -> AppResult<Admin> {
        let active_model = admin::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            is_root: Set(is_root),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Admin::from(model))
    }
}
