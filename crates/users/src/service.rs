use crate::error::Result;
use crate::producer::{UserProducer, UserPublisher};
use crate::store::UserStore;
use crate::user::{NewUser, User, UserPatch, UserUpdate};

/// CRUD over the user store. Every mutation that finds its target publishes
/// the resulting user exactly once.
#[derive(Clone, Debug)]
pub struct UserService<P> {
    producer: UserProducer<P>,
    store: UserStore,
}

impl<P> UserService<P>
where
    P: UserPublisher,
{
    /// Creates a service with an empty store.
    pub fn new(producer: UserProducer<P>) -> Self {
        Self::with_store(producer, UserStore::new())
    }

    /// Creates a service over an existing store.
    pub const fn with_store(producer: UserProducer<P>, store: UserStore) -> Self {
        Self { producer, store }
    }

    /// Stores a new user, generating an id if none was given, and
    /// publishes it.
    ///
    /// # Errors
    ///
    /// Returns an error if publishing fails. The user stays stored.
    pub async fn create(&self, new_user: NewUser) -> Result<User> {
        let user = new_user.into_user();
        self.store.insert(user.clone());

        self.producer.send(&user).await?;

        Ok(user)
    }

    /// Returns the first user with `id`.
    pub fn get(&self, id: &str) -> Option<User> {
        self.store.get(id)
    }

    /// Returns every user in insertion order.
    pub fn list(&self) -> Vec<User> {
        self.store.list()
    }

    /// Replaces the non-null fields of a user and publishes the result.
    ///
    /// # Errors
    ///
    /// Returns an error if publishing fails. The update stays applied.
    pub async fn update(&self, id: &str, update: UserUpdate) -> Result<Option<User>> {
        match self.store.update(id, update) {
            Some(user) => {
                self.producer.send(&user).await?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Replaces the present fields of a user and publishes the result.
    ///
    /// # Errors
    ///
    /// Returns an error if publishing fails. The patch stays applied.
    pub async fn patch(&self, id: &str, patch: UserPatch) -> Result<Option<User>> {
        match self.store.patch(id, patch) {
            Some(user) => {
                self.producer.send(&user).await?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Removes a user and publishes a deletion notification for its id.
    ///
    /// # Errors
    ///
    /// Returns an error if publishing fails. The user stays removed.
    pub async fn delete(&self, id: &str) -> Result<Option<User>> {
        match self.store.remove(id) {
            Some(user) => {
                self.producer.send_deletion(id).await?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }
}
