//! Driven port for the user collection.
//!
//! Inbound adapters depend on this trait rather than on a concrete
//! collection so handlers can be exercised against mocks and the storage can
//! change without touching the HTTP layer.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserChanges, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserStoreError {
        /// No record carries the requested identifier.
        NotFound { id: UserId } => "user {id} not found",
        /// A writer panicked while holding the collection lock.
        Poisoned => "user store lock poisoned",
    }
}

/// Ordered collection of users keyed by integer identifier.
///
/// Each call is atomic with respect to the collection: implementations must
/// not let another call observe a half-applied mutation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Return every record in insertion order.
    async fn list(&self) -> Result<Vec<User>, UserStoreError>;

    /// Fetch the record with the given identifier.
    async fn find(&self, id: UserId) -> Result<User, UserStoreError>;

    /// Append a record under the next identifier (`max + 1`, or `1` when
    /// empty) and return it.
    async fn insert(&self, user: NewUser) -> Result<User, UserStoreError>;

    /// Apply `changes` to an existing record and return the result.
    async fn update(&self, id: UserId, changes: UserChanges) -> Result<User, UserStoreError>;

    /// Remove a record and return it.
    async fn delete(&self, id: UserId) -> Result<User, UserStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn not_found_message_names_identifier() {
        let err = UserStoreError::not_found(UserId::new(9999));
        assert_eq!(err.to_string(), "user 9999 not found");
    }

    #[rstest]
    fn not_found_accepts_raw_integers() {
        assert_eq!(
            UserStoreError::not_found(4_i64),
            UserStoreError::NotFound { id: UserId::new(4) }
        );
    }
}
