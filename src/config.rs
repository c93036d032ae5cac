use std::env;

/// Process configuration, read once at startup and passed down explicitly.
/// Only `DATABASE_URL` is required; everything else has a dev default.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub seed_username: String,
    pub seed_password: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "dev_secret".into()),
            seed_username: env::var("SEED_USERNAME").unwrap_or_else(|_| "testuser".into()),
            seed_password: env::var("SEED_PASSWORD").unwrap_or_else(|_| "Password123".into()),
        })
    }
}
