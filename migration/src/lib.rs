pub use sea_orm_migration::prelude::*;

mod m20251001_000001_create_accounts;
mod m20251001_000002_create_blog;
mod m20251001_000003_create_qna;
mod m20251001_000004_create_finance;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_accounts::Migration),
            Box::new(m20251001_000002_create_blog::Migration),
            Box::new(m20251001_000003_create_qna::Migration),
            Box::new(m20251001_000004_create_finance::Migration),
        ]
    }
}
