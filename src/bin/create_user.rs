//! Seeds the credential store with the default login. Safe to run repeatedly:
//! an existing user is left untouched, hash included.

use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pricelist_api::auth::credentials;
use pricelist_api::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!().run(&pool).await?;

    match credentials::provision(&pool, &config.seed_username, &config.seed_password).await {
        Ok(true) => tracing::info!("Created user: {}", config.seed_username),
        Ok(false) => tracing::info!("User {} already exists, left unchanged", config.seed_username),
        Err(e) => {
            tracing::error!("Error creating user: {:?}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
