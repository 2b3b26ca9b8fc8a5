//! Migration CLI for the store schema.
//!
//! Reads `DATABASE_URL`, e.g. `migration up` or `migration fresh`.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,sqlx=warn".to_string()),
        )
        .init();

    tracing::info!("Running store schema migrations");
    cli::run_cli(migration::Migrator).await;
}
