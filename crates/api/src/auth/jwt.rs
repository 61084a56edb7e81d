//! Verification of identity-provider access tokens.
//!
//! Tokens are HS256-signed JWTs issued by the external identity provider;
//! this server never manages credentials or sessions and never issues
//! tokens of its own. It only verifies the signature and expiry and reads
//! the identity claims.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Identity claims asserted by the provider in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the provider's opaque id for the caller.
    pub sub: String,
    /// Verified email address.
    pub email: String,
    /// Optional first name.
    #[serde(default)]
    pub given_name: Option<String>,
    /// Optional last name.
    #[serde(default)]
    pub family_name: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Configuration for token verification.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self { secret }
    }
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Validates the signature, expiration, and issued-at claims automatically.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// Sign a token the way the provider does.
///
/// The server never calls this in request handling; it exists for
/// integration tests and local tooling that need provider-shaped tokens.
pub fn sign_token(
    claims: &Claims,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(), // HS256
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
        }
    }

    fn claims(exp_offset: i64) -> Claims {
        let now = chrono::Utc::now().timestamp();
        Claims {
            sub: "user_2abc".to_string(),
            email: "ada@example.com".to_string(),
            given_name: Some("Ada".to_string()),
            family_name: None,
            exp: now + exp_offset,
            iat: now,
        }
    }

    #[test]
    fn round_trip_preserves_identity_claims() {
        let config = test_config();
        let token = sign_token(&claims(3600), &config).unwrap();
        let decoded = validate_token(&token, &config).unwrap();

        assert_eq!(decoded.sub, "user_2abc");
        assert_eq!(decoded.email, "ada@example.com");
        assert_eq!(decoded.given_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let token = sign_token(&claims(-3600), &config).unwrap();
        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign_token(&claims(3600), &test_config()).unwrap();
        let other = JwtConfig {
            secret: "other-secret".to_string(),
        };
        assert!(validate_token(&token, &other).is_err());
    }
}
