//! Donor repository: donor profiles and their donated totals.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, Set, Statement,
};
use uuid::Uuid;

use super::entities::{
    donor::{self, Entity as DonorEntity},
    user,
};
use crate::domain::{Donor, DonorProfile, Gender};
use crate::errors::{AppError, AppResult};

/// Creation parameters for a donor profile
#[derive(Debug, Clone)]
pub struct NewDonor {
    pub user_id: Uuid,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub phone: String,
    pub cpf: String,
}

/// Update parameters; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct DonorUpdate {
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
}

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait DonorRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DonorProfile>>;

    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<Donor>>;

    /// Page of donor profiles plus the total count of active donors
    async fn list(&self, offset: u64, limit: u64) -> AppResult<(Vec<DonorProfile>, u64)>;

    async fn create(&self, donor: NewDonor) -> AppResult<Donor>;

    async fn update(&self, id: Uuid, update: DonorUpdate) -> AppResult<Donor>;

    /// Lifetime donated amount in cents; 0 for donors with no donations
    async fn total_amount_donated_by_donor_id(&self, donor_id: Uuid) -> AppResult<i64>;
}

/// SeaORM-backed implementation of [`DonorRepository`]
pub struct DonorStore {
    db: DatabaseConnection,
}

impl DonorStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn profile(donor: donor::Model, user: user::Model) -> DonorProfile {
        DonorProfile {
            id: donor.id,
            user_id: donor.user_id,
            full_name: user.full_name,
            email: user.email,
            birth_date: donor.birth_date,
            gender: Gender::from(donor.gender.as_str()),
            phone: donor.phone,
            cpf: donor.cpf,
            created_at: user.created_at,
        }
    }
}

#[async_trait]
impl DonorRepository for DonorStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DonorProfile>> {
        let result = DonorEntity::find_by_id(id)
            .find_also_related(user::Entity)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(result.and_then(|(donor, user)| user.map(|u| Self::profile(donor, u))))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<Donor>> {
        let result = DonorEntity::find()
            .filter(donor::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(result.map(Donor::from))
    }

    async fn list(&self, offset: u64, limit: u64) -> AppResult<(Vec<DonorProfile>, u64)> {
        let query = DonorEntity::find()
            .find_also_related(user::Entity)
            .filter(user::Column::DeletedAt.is_null());

        let paginator = query.paginate(&self.db, limit.max(1));
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(offset / limit.max(1)).await?;

        let profiles = rows
            .into_iter()
            .filter_map(|(donor, user)| user.map(|u| Self::profile(donor, u)))
            .collect();

        Ok((profiles, total))
    }

    async fn create(&self, new: NewDonor) -> AppResult<Donor> {
        let active_model = donor::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(new.user_id),
            birth_date: Set(new.birth_date),
            gender: Set(new.gender.to_string()),
            phone: Set(new.phone),
            cpf: Set(new.cpf),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Donor::from(model))
    }

    async fn update(&self, id: Uuid, update: DonorUpdate) -> AppResult<Donor> {
        let model = DonorEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: donor::ActiveModel = model.into();
        if let Some(birth_date) = update.birth_date {
            active.birth_date = Set(birth_date);
        }
        if let Some(gender) = update.gender {
            active.gender = Set(gender.to_string());
        }
        if let Some(phone) = update.phone {
            active.phone = Set(phone);
        }

        let model = active.update(&self.db).await?;
        Ok(Donor::from(model))
    }

    async fn total_amount_donated_by_donor_id(&self, donor_id: Uuid) -> AppResult<i64> {
        let row = self
            .db
            .query_one(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT COALESCE(SUM(amount_cents), 0)::bigint AS total \
                 FROM donations WHERE donor_id = $1",
                [donor_id.into()],
            ))
            .await?;

        let total = row
            .and_then(|r| r.try_get::<i64>("", "total").ok())
            .unwrap_or(0);

        Ok(total)
    }
}
