//! Seeds one example document of every type into the configured database.
//!
//! Usage: set DATABASE_URL (or rely on the development default), then
//! `cargo run --bin seed_demo`. Prints the issued numbers and codes so
//! they can be used against the verification service.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use dha_core::services::Seeder;
use dha_infra::database::{DatabasePool, MySqlVerificationRepository};
use dha_shared::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config);

    let pool = DatabasePool::new(&config.database).await?;
    pool.health_check().await?;

    let repository = Arc::new(MySqlVerificationRepository::new(pool.pool().clone()));
    let seeder = Seeder::new(repository);

    let issued = seeder.seed_examples().await?;
    for (document, record) in &issued {
        println!(
            "{:<12} {:<20} code: {}",
            document.document_type.as_str(),
            document.document_number,
            record.verification_code
        );
    }
    tracing::info!(count = issued.len(), event = "seed_complete", "Seeding finished");

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    if config.logging.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
