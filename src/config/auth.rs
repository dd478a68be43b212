//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum HS256 secret length accepted in production.
pub const MIN_PRODUCTION_SECRET_BYTES: usize = 32;

/// Authentication configuration (HS256 access tokens)
///
/// Tokens are the ones issued by the hosted auth provider: `sub` is the user
/// id and `aud` is usually `authenticated`.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret used to verify access token signatures
    pub jwt_secret: Secret<String>,

    /// Expected audience for tokens
    #[serde(default = "default_jwt_audience")]
    pub jwt_audience: String,

    /// Expected issuer, when the provider sets one
    pub jwt_issuer: Option<String>,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// In production, requires a secret of at least
    /// [`MIN_PRODUCTION_SECRET_BYTES`] bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.jwt_audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_AUDIENCE"));
        }

        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_BYTES {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_BYTES));
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Secret::new(String::new()),
            jwt_audience: default_jwt_audience(),
            jwt_issuer: None,
        }
    }
}

fn default_jwt_audience() -> String {
    "authenticated".to_string()
}
