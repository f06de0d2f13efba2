//! SeaORM entity for the `payments` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub donation_id: Uuid,
    pub method: String,
    pub status: String,
    pub amount_cents: i64,
    pub paid_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::donation::Entity",
        from = "Column::DonationId",
        to = "super::donation::Column::Id"
    )]
    Donation,
}

impl Related<super::donation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Payment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            donation_id: model.donation_id,
            method: crate::domain::PaymentMethod::from(model.method.as_str()),
            status: crate::domain::PaymentStatus::from(model.status.as_str()),
            amount_cents: model.amount_cents,
            paid_at: model.paid_at,
        }
    }
}
