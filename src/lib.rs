pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod repo;
pub mod rest;

use sqlx::sqlite::SqlitePool;

use crate::auth::token::TokenSigner;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub tokens: TokenSigner,
}
