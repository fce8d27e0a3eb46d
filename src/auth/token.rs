use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::Role;
use crate::config;

/// Claims embedded in every access token.
///
/// Field names on the wire (`rol`, `id_establecimiento`) are part of the
/// contract with the existing frontend and must not change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub name: String,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(rename = "id_establecimiento")]
    pub establishment_id: Option<i64>,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(id: i64, name: String, role: Role, establishment_id: Option<i64>) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            id,
            name,
            role,
            establishment_id,
            iat: now.timestamp(),
            exp,
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret not configured")]
    SecretMissing,

    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),

    #[error("JWT generation error: {0}")]
    Generation(String),
}

impl From<TokenError> for crate::error::ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired | TokenError::Invalid(_) => {
                crate::error::ApiError::unauthorized(err.to_string())
            }
            TokenError::SecretMissing | TokenError::Generation(_) => {
                tracing::error!("token error: {}", err);
                crate::error::ApiError::internal_server_error("Failed to process token")
            }
        }
    }
}

/// Sign claims into an HS256 token using the configured secret.
pub fn sign(claims: &Claims) -> Result<String, TokenError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(TokenError::SecretMissing);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| TokenError::Generation(e.to_string()))
}

/// Verify signature and expiry, returning the decoded claims.
pub fn verify(token: &str) -> Result<Claims, TokenError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(TokenError::SecretMissing);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    // Pin the secret before the config singleton is first touched.
    fn init() {
        static INIT: OnceLock<()> = OnceLock::new();
        INIT.get_or_init(|| {
            std::env::set_var("JWT_SECRET", "token-unit-test-secret");
        });
    }

    #[test]
    fn sign_verify_roundtrip() {
        init();
        let claims = Claims::new(7, "Marta".to_string(), Role::Veterinario, Some(3));
        let token = sign(&claims).unwrap();
        let decoded = verify(&token).unwrap();

        assert_eq!(decoded.id, 7);
        assert_eq!(decoded.name, "Marta");
        assert_eq!(decoded.role, Role::Veterinario);
        assert_eq!(decoded.establishment_id, Some(3));
    }

    #[test]
    fn expired_token_is_rejected() {
        init();
        let mut claims = Claims::new(1, "x".to_string(), Role::Operario, Some(1));
        claims.iat = Utc::now().timestamp() - 7200;
        claims.exp = Utc::now().timestamp() - 3600;

        let token = sign(&claims).unwrap();
        assert!(matches!(verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        init();
        let claims = Claims::new(1, "x".to_string(), Role::Admin, None);
        let forged = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"some-other-secret"),
        )
        .unwrap();

        assert!(matches!(verify(&forged), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn claims_use_contract_field_names() {
        init();
        let claims = Claims::new(2, "Ana".to_string(), Role::Operario, None);
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["rol"], "operario");
        assert!(value["id_establecimiento"].is_null());
        assert!(value.get("role").is_none());
        assert!(value.get("establishment_id").is_none());
    }
}
