//! HS256 access-token adapter for the `SessionValidator` port.
//!
//! Validates tokens signed with the hosted auth provider's shared JWT secret:
//!
//! 1. Verifies the HMAC-SHA256 signature
//! 2. Validates audience, expiry and (when configured) issuer claims
//! 3. Maps `sub` to the caller's `UserId`
//!
//! # Example
//!
//! ```ignore
//! let validator = JwtSessionValidator::from_config(&config.auth);
//! let user = validator.validate("eyJ...").await?;
//! ```

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccessTokenClaims {
    /// Subject - the user ID
    sub: String,

    /// Audience - array or single string
    #[serde(default)]
    aud: Audience,

    /// Expiry timestamp (Unix epoch seconds)
    exp: i64,
}

/// Audience can be a single string or array of strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
enum Audience {
    #[default]
    None,
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    fn contains(&self, expected: &str) -> bool {
        match self {
            Audience::None => false,
            Audience::Single(s) => s == expected,
            Audience::Multiple(v) => v.iter().any(|s| s == expected),
        }
    }
}

/// Session validator for HS256-signed access tokens.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    audience: String,
}

impl JwtSessionValidator {
    /// Build a validator from the shared secret and expected claims.
    pub fn new(secret: &[u8], audience: impl Into<String>, issuer: Option<&str>) -> Self {
        let audience = audience.into();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&audience]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            audience,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.jwt_secret.expose_secret().as_bytes(),
            config.jwt_audience.clone(),
            config.jwt_issuer.as_deref(),
        )
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let token_data = decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidAudience => {
                        tracing::warn!("Invalid audience in token");
                        AuthError::InvalidToken
                    }
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Invalid issuer in token");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::debug!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })?;
        let claims = token_data.claims;

        if !claims.aud.contains(&self.audience) {
            tracing::warn!("Audience mismatch: expected '{}', got '{:?}'", self.audience, claims.aud);
            return Err(AuthError::InvalidToken);
        }

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Invalid user ID in token: {:?}", claims.sub);
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(user_id))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &[u8] = b"test-secret-that-is-long-enough-for-hs256";

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    fn sign(claims: serde_json::Value, secret: &[u8]) -> String {
        encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret)).unwrap()
    }

    fn validator() -> JwtSessionValidator {
        JwtSessionValidator::new(SECRET, "authenticated", None)
    }

    #[tokio::test]
    async fn valid_token_maps_to_user() {
        let token = sign(
            json!({
                "sub": "0b8e6c1e-user",
                "aud": "authenticated",
                "exp": now() + 3600,
                "email": "alice@example.com",
                "user_metadata": { "full_name": "Alice" }
            }),
            SECRET,
        );

        let user = validator().validate(&token).await.unwrap();

        assert_eq!(user.id.as_str(), "0b8e6c1e-user");
    }

    #[tokio::test]
    async fn expired_token_is_rejected_as_expired() {
        let token = sign(
            json!({ "sub": "u1", "aud": "authenticated", "exp": now() - 3600 }),
            SECRET,
        );

        let result = validator().validate(&token).await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn wrong_audience_is_rejected() {
        let token = sign(
            json!({ "sub": "u1", "aud": "someone-else", "exp": now() + 3600 }),
            SECRET,
        );

        let result = validator().validate(&token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn audience_array_is_accepted() {
        let token = sign(
            json!({ "sub": "u1", "aud": ["other", "authenticated"], "exp": now() + 3600 }),
            SECRET,
        );

        assert!(validator().validate(&token).await.is_ok());
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let token = sign(
            json!({ "sub": "u1", "aud": "authenticated", "exp": now() + 3600 }),
            b"a-completely-different-signing-secret",
        );

        let result = validator().validate(&token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn issuer_is_checked_when_configured() {
        let validator = JwtSessionValidator::new(
            SECRET,
            "authenticated",
            Some("https://project.example.co/auth/v1"),
        );
        let token = sign(
            json!({
                "sub": "u1",
                "aud": "authenticated",
                "exp": now() + 3600,
                "iss": "https://elsewhere.example.com"
            }),
            SECRET,
        );

        let result = validator.validate(&token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn blank_subject_is_rejected() {
        let token = sign(
            json!({ "sub": " ", "aud": "authenticated", "exp": now() + 3600 }),
            SECRET,
        );

        let result = validator().validate(&token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn garbage_is_rejected() {
        let result = validator().validate("not-a-jwt").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn debug_does_not_print_key() {
        let debug = format!("{:?}", validator());
        assert!(debug.contains("authenticated"));
        assert!(!debug.contains("test-secret"));
    }
}
