//! In-memory user store.
//!
//! Records live in a `Vec` behind a mutex so insertion order is preserved
//! and every port call is applied atomically. Nothing survives a restart.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{NewUser, User, UserChanges, UserId, UserName, UserValidationError};

/// Records loaded into [`InMemoryUserStore::seeded`].
const SEED_USERS: [(i64, &str, i64); 3] = [(1, "Alice", 12), (2, "John", 12), (3, "Robert", 12)];

/// Process-local user store backed by a mutex-guarded vector.
///
/// # Examples
/// ```
/// use backend::outbound::memory::InMemoryUserStore;
///
/// let store = InMemoryUserStore::seeded().expect("seed data is valid");
/// assert_eq!(store.len().expect("lock"), 3);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given records in order.
    #[must_use]
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    /// Create a store holding the startup records
    /// `Alice`, `John` and `Robert`, all aged 12.
    ///
    /// # Errors
    /// Returns [`UserValidationError`] if a seed name fails validation.
    pub fn seeded() -> Result<Self, UserValidationError> {
        let users = SEED_USERS
            .into_iter()
            .map(|(id, name, age)| {
                UserName::new(name).map(|name| User::new(UserId::new(id), name, Some(age)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_users(users))
    }

    /// Number of records currently held.
    ///
    /// # Errors
    /// Returns [`UserStoreError::Poisoned`] if the lock is poisoned.
    pub fn len(&self) -> Result<usize, UserStoreError> {
        Ok(self.lock()?.len())
    }

    /// Whether the store holds no records.
    ///
    /// # Errors
    /// Returns [`UserStoreError::Poisoned`] if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, UserStoreError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, UserStoreError> {
        self.users.lock().map_err(|_| UserStoreError::poisoned())
    }
}

fn position(users: &[User], id: UserId) -> Result<usize, UserStoreError> {
    users
        .iter()
        .position(|user| user.id() == id)
        .ok_or_else(|| UserStoreError::not_found(id))
}

fn next_id(users: &[User]) -> UserId {
    users
        .iter()
        .map(User::id)
        .max()
        .map_or(UserId::new(1), UserId::next)
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, UserStoreError> {
        Ok(self.lock()?.clone())
    }

    async fn find(&self, id: UserId) -> Result<User, UserStoreError> {
        let users = self.lock()?;
        users
            .iter()
            .find(|user| user.id() == id)
            .cloned()
            .ok_or_else(|| UserStoreError::not_found(id))
    }

    async fn insert(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.lock()?;
        let id = next_id(&users);
        let created = User::from_draft(id, user);
        users.push(created.clone());
        debug!(user_id = %id, "user inserted");
        Ok(created)
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> Result<User, UserStoreError> {
        let mut users = self.lock()?;
        let index = position(&users, id)?;
        let user = users
            .get_mut(index)
            .ok_or_else(|| UserStoreError::not_found(id))?;
        user.apply(changes);
        debug!(user_id = %id, "user updated");
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<User, UserStoreError> {
        let mut users = self.lock()?;
        let index = position(&users, id)?;
        let removed = users.remove(index);
        debug!(user_id = %id, "user deleted");
        Ok(removed)
    }
}
