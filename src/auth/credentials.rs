use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sqlx::sqlite::SqlitePool;

use crate::error::AppError;
use crate::models::user::{User, UserIdentity};

/// Looks up a username and checks the password against the stored argon2 hash.
/// Unknown username and wrong password fail identically so the response never
/// leaks whether an account exists.
pub async fn verify(
    db: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<UserIdentity, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(db)
    .await?
    .ok_or(AppError::Auth("Invalid credentials"))?;

    let parsed_hash = PasswordHash::new(&user.password_hash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Auth("Invalid credentials"))?;

    Ok(UserIdentity {
        id: user.id,
        username: user.username,
    })
}

/// Creates a user with a freshly salted hash. Idempotent: if the username
/// already exists the row is left untouched, including its hash. Returns
/// whether a new user was created.
pub async fn provision(
    db: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<bool, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();

    let result = sqlx::query(
        "INSERT INTO users (username, password_hash) VALUES (?, ?) ON CONFLICT(username) DO NOTHING",
    )
    .bind(username)
    .bind(&password_hash)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}
