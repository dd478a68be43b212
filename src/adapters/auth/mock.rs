//! Mock session validator for testing.
//!
//! Maps fixed bearer tokens to users so HTTP tests can act as specific
//! callers without signing real access tokens.
//!
//! ```ignore
//! let validator = MockSessionValidator::new().with_test_user("token-u1", "u1");
//! let user = validator.validate("token-u1").await?;
//! ```

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AuthenticatedUser, AuthError, UserId};
use crate::ports::SessionValidator;

/// Token-to-user table. Unknown tokens are `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: HashMap<String, AuthenticatedUser>,
    /// Returned for every token when set.
    outage: Option<AuthError>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.insert(token.into(), user);
        self
    }

    /// Registers `token` for the user `user_id`.
    ///
    /// # Panics
    ///
    /// Panics if `user_id` is blank.
    pub fn with_test_user(self, token: impl Into<String>, user_id: &str) -> Self {
        let user = AuthenticatedUser::new(
            UserId::new(user_id).expect("test user id must not be blank"),
        );
        self.with_user(token, user)
    }

    /// Makes every validation fail with `error`.
    pub fn with_error(mut self, error: AuthError) -> Self {
        self.outage = Some(error);
        self
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = &self.outage {
            return Err(error.clone());
        }

        self.tokens.get(token).cloned().ok_or(AuthError::InvalidToken)
    }
}
