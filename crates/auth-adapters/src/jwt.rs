//! HS256 access tokens.
//!
//! The forum only consumes tokens; [`JwtTokenManager::create_access_token`]
//! exists for the seeding tool and tests.

use chrono::Utc;
use domains::{DomainError, TokenVerifier};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AuthError;

/// Payload of an access token. Only `id` is used for authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub id: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct JwtTokenManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    token_age_secs: i64,
}

impl JwtTokenManager {
    pub fn new(secret: &[u8], token_age_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            token_age_secs: i64::try_from(token_age_secs).unwrap_or(i64::MAX),
        }
    }

    pub fn create_access_token(&self, user_id: &str, username: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            id: user_id.to_string(),
            username: username.to_string(),
            iat: now,
            exp: now.saturating_add(self.token_age_secs),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Encode(e.to_string()))
    }

    pub fn decode_claims(&self, token: &str) -> Result<AccessClaims, AuthError> {
        decode::<AccessClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "access token rejected");
                AuthError::InvalidToken
            })
    }
}

impl TokenVerifier for JwtTokenManager {
    fn decode_user_id(&self, token: &str) -> domains::Result<String> {
        self.decode_claims(token)
            .map(|claims| claims.id)
            .map_err(DomainError::from)
    }
}
