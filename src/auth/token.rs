use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::user::UserIdentity;

/// Sessions live exactly this long; there is no server-side session table, so
/// a token cannot be revoked before its expiry.
pub const SESSION_TTL_HOURS: i64 = 8;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Stateless issuer/verifier of bearer tokens, HS256 over a shared secret.
/// Both halves of the keypair derive from the same secret, so any process
/// configured with it can mint and check tokens interchangeably.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn with_default_ttl(secret: &str) -> Self {
        Self::new(secret, Duration::hours(SESSION_TTL_HOURS))
    }

    pub fn issue(&self, identity: &UserIdentity) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: identity.id,
            username: identity.username.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Checks signature and expiry, then returns the embedded identity as-is.
    /// Never consults the credential store.
    pub fn verify(&self, token: &str) -> Result<UserIdentity, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| AppError::Auth("Invalid token"))?;
        Ok(UserIdentity {
            id: data.claims.sub,
            username: data.claims.username,
        })
    }
}
