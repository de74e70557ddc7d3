use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(quill_blog_migration::Migrator).await;
}
