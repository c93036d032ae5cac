use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::AppError;
use crate::models::user::UserIdentity;
use crate::AppState;

/// Extractor for protected routes. Rejects with 401 before the handler body
/// runs, so an unauthenticated request never reaches the repository.
pub struct AuthUser(pub UserIdentity);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Auth("Missing token"))?;
        let value = header
            .to_str()
            .map_err(|_| AppError::Auth("Invalid auth header"))?;

        let token = match value.split_once(' ') {
            Some(("Bearer", token)) if !token.is_empty() => token,
            _ => return Err(AppError::Auth("Invalid auth header")),
        };

        let identity = state.tokens.verify(token)?;
        Ok(AuthUser(identity))
    }
}
