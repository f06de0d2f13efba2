//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users_table;
mod m20250301_000002_create_profiles;
mod m20250301_000003_create_campaigns;
mod m20250301_000004_create_donations;
mod m20250301_000005_create_content_tables;
mod m20250301_000006_create_newsletter;
mod m20250301_000007_create_password_reset_tokens;
mod m20250302_000001_add_user_soft_delete;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_table::Migration),
            Box::new(m20250301_000002_create_profiles::Migration),
            Box::new(m20250301_000003_create_campaigns::Migration),
            Box::new(m20250301_000004_create_donations::Migration),
            Box::new(m20250301_000005_create_content_tables::Migration),
            Box::new(m20250301_000006_create_newsletter::Migration),
            Box::new(m20250301_000007_create_password_reset_tokens::Migration),
            Box::new(m20250302_000001_add_user_soft_delete::Migration),
        ]
    }
}
