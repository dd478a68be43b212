//! Ownership trait for user-owned resources.
//!
//! Aggregates with a single owning user implement `OwnedByUser` and get a
//! uniform `check_ownership()` that yields a `Forbidden` domain error.
//!
//! ```ignore
//! poll.check_ownership(&caller)?;  // Err(Forbidden) unless caller created the poll
//! ```

use super::{DomainError, ErrorCode, UserId};

/// Trait for aggregates that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Validates ownership, returning a `Forbidden` error if the user is not the owner.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User does not own this resource",
            )
            .with_detail("owner_id", self.owner_id().to_string())
            .with_detail("requested_by", user_id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Owned {
        owner: UserId,
    }

    impl OwnedByUser for Owned {
        fn owner_id(&self) -> &UserId {
            &self.owner
        }
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn check_ownership_succeeds_for_owner() {
        let resource = Owned {
            owner: user("owner-123"),
        };
        assert!(resource.check_ownership(&user("owner-123")).is_ok());
    }

    #[test]
    fn check_ownership_fails_for_non_owner_with_details() {
        let resource = Owned {
            owner: user("owner-123"),
        };

        let err = resource.check_ownership(&user("other-456")).unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(err.details.get("owner_id"), Some(&"owner-123".to_string()));
        assert_eq!(err.details.get("requested_by"), Some(&"other-456".to_string()));
    }
}
