//! User service: use-cases for managing user accounts.

use mudstore_domain::error::MudError;
use mudstore_domain::id::UserId;
use mudstore_domain::user::{User, UserChange, UserFilter};

use crate::ports::UserStorage;

/// Application service for user CRUD operations.
pub struct UserService<S> {
    storage: S,
}

impl<S: UserStorage> UserService<S> {
    /// Create a new service backed by the given storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// List users, bounding the requested page to the user limits.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the port.
    #[tracing::instrument(skip(self))]
    pub async fn list_users(&self, filter: UserFilter) -> Result<Vec<User>, MudError> {
        let filter = filter.normalized();
        self.storage.list(&filter).await
    }

    /// Look up a user by id.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no user with `id` exists, or a
    /// storage error from the port.
    #[tracing::instrument(skip(self))]
    pub async fn get_user(&self, id: UserId) -> Result<User, MudError> {
        self.storage.get(id).await
    }

    /// Register a new user after validating the change.
    ///
    /// # Errors
    ///
    /// Returns [`MudError::Validation`] if invariants fail, or a storage
    /// error (conflict on a taken login) propagated from the port.
    #[tracing::instrument(skip(self, change), fields(login = %change.login))]
    pub async fn create_user(&self, change: UserChange) -> Result<User, MudError> {
        change.validate()?;
        self.storage.create(change).await
    }

    /// Update an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`MudError::Validation`] if invariants fail, or a storage
    /// error from the port.
    #[tracing::instrument(skip(self, change), fields(login = %change.login))]
    pub async fn update_user(&self, id: UserId, change: UserChange) -> Result<User, MudError> {
        change.validate()?;
        self.storage.update(id, change).await
    }

    /// Delete a user by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the port.
    #[tracing::instrument(skip(self))]
    pub async fn remove_user(&self, id: UserId) -> Result<(), MudError> {
        self.storage.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mudstore_domain::error::ValidationError;
    use mudstore_domain::page::Page;
    use mudstore_domain::time::now;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryUserStorage {
        users: Mutex<Vec<User>>,
        filters: Mutex<Vec<UserFilter>>,
    }

    impl UserStorage for InMemoryUserStorage {
        fn list(
            &self,
            filter: &UserFilter,
        ) -> impl Future<Output = Result<Vec<User>, MudError>> + Send {
            self.filters.lock().unwrap().push(filter.clone());
            let users = self.users.lock().unwrap().clone();
            async { Ok(users) }
        }

        fn get(&self, id: UserId) -> impl Future<Output = Result<User, MudError>> + Send {
            let user = self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|user| user.id == id)
                .cloned();
            async move { Ok(user.expect("seeded by the test")) }
        }

        fn create(&self, change: UserChange) -> impl Future<Output = Result<User, MudError>> + Send {
            let timestamp = now();
            let user = User {
                id: UserId::new(),
                login: change.login,
                public_key: change.public_key,
                player_id: change.player_id,
                created: timestamp,
                updated: timestamp,
            };
            self.users.lock().unwrap().push(user.clone());
            async { Ok(user) }
        }

        fn update(
            &self,
            id: UserId,
            change: UserChange,
        ) -> impl Future<Output = Result<User, MudError>> + Send {
            let mut users = self.users.lock().unwrap();
            let user = users
                .iter_mut()
                .find(|user| user.id == id)
                .expect("seeded by the test");
            user.login = change.login;
            user.public_key = change.public_key;
            user.player_id = change.player_id;
            let user = user.clone();
            async { Ok(user) }
        }

        fn remove(&self, id: UserId) -> impl Future<Output = Result<(), MudError>> + Send {
            self.users.lock().unwrap().retain(|user| user.id != id);
            async { Ok(()) }
        }
    }

    fn make_service() -> UserService<InMemoryUserStorage> {
        UserService::new(InMemoryUserStorage::default())
    }

    #[tokio::test]
    async fn should_register_user_with_public_key() {
        let svc = make_service();

        let user = svc
            .create_user(UserChange::new("ajones", b"ssh-ed25519 AAAA".to_vec()))
            .await
            .unwrap();

        let fetched = svc.get_user(user.id).await.unwrap();
        assert_eq!(fetched.login, "ajones");
        assert_eq!(fetched.public_key, b"ssh-ed25519 AAAA".to_vec());
    }

    #[tokio::test]
    async fn should_reject_empty_public_key() {
        let svc = make_service();

        let result = svc.create_user(UserChange::new("ajones", Vec::new())).await;

        assert!(matches!(
            result,
            Err(MudError::Validation(ValidationError::EmptyPublicKey))
        ));
    }

    #[tokio::test]
    async fn should_clamp_user_page() {
        let svc = make_service();

        svc.list_users(UserFilter {
            page: Page::new(0, 999),
        })
        .await
        .unwrap();

        let filters = svc.storage.filters.lock().unwrap();
        assert_eq!(filters[0].page.limit, UserFilter::MAX_LIMIT);
    }

    #[tokio::test]
    async fn should_update_and_remove_user() {
        let svc = make_service();
        let user = svc
            .create_user(UserChange::new("ajones", b"k1".to_vec()))
            .await
            .unwrap();

        let updated = svc
            .update_user(user.id, UserChange::new("ajones", b"k2".to_vec()))
            .await
            .unwrap();
        assert_eq!(updated.public_key, b"k2".to_vec());

        svc.remove_user(user.id).await.unwrap();
        assert!(svc.list_users(UserFilter::default()).await.unwrap().is_empty());
    }
}
