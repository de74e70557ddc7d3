pub use sea_orm_migration::prelude::*;

mod m20260401_000001_create_users;
mod m20260401_000002_create_categories;
mod m20260401_000003_create_posts;
mod m20260401_000004_create_comments;
mod m20260401_000005_create_likes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260401_000001_create_users::Migration),
            Box::new(m20260401_000002_create_categories::Migration),
            Box::new(m20260401_000003_create_posts::Migration),
            Box::new(m20260401_000004_create_comments::Migration),
            Box::new(m20260401_000005_create_likes::Migration),
        ]
    }
}
