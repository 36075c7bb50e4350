use crate::user::{User, UserPatch, UserUpdate};

use std::sync::Arc;

use parking_lot::RwLock;

/// Insertion-ordered in-memory list of users.
///
/// Identifiers are not checked for uniqueness; lookups return the first
/// match. Clones share the same list.
#[derive(Clone, Debug, Default)]
pub struct UserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserStore {
    /// Creates a new, empty `UserStore`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user.
    pub fn insert(&self, user: User) {
        self.users.write().push(user);
    }

    /// Returns the first user with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<User> {
        self.users.read().iter().find(|user| user.id == id).cloned()
    }

    /// Returns every user in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.users.read().clone()
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }

    /// Applies `update` to the first user with the given id and returns the
    /// result.
    pub fn update(&self, id: &str, update: UserUpdate) -> Option<User> {
        self.modify(id, |user| user.apply_update(update))
    }

    /// Applies `patch` to the first user with the given id and returns the
    /// result.
    pub fn patch(&self, id: &str, patch: UserPatch) -> Option<User> {
        self.modify(id, |user| user.apply_patch(patch))
    }

    /// Removes the first user with the given id.
    pub fn remove(&self, id: &str) -> Option<User> {
        let mut users = self.users.write();
        let index = users.iter().position(|user| user.id == id)?;
        Some(users.remove(index))
    }

    fn modify<F>(&self, id: &str, f: F) -> Option<User>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.write();
        let user = users.iter_mut().find(|user| user.id == id)?;
        f(user);
        Some(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: Some(name.to_string()),
            email: None,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let store = UserStore::new();
        store.insert(user("a", "Alice"));

        assert_eq!(store.get("a"), Some(user("a", "Alice")));
        assert_eq!(store.get("b"), None);
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let store = UserStore::new();
        assert!(store.is_empty());

        store.insert(user("b", "Bob"));
        store.insert(user("a", "Alice"));

        assert_eq!(store.list(), vec![user("b", "Bob"), user("a", "Alice")]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first() {
        let store = UserStore::new();
        store.insert(user("a", "First"));
        store.insert(user("a", "Second"));

        assert_eq!(store.get("a"), Some(user("a", "First")));

        store.remove("a");
        assert_eq!(store.get("a"), Some(user("a", "Second")));
    }

    #[test]
    fn test_update_and_patch() {
        let store = UserStore::new();
        store.insert(user("a", "Alice"));

        let updated = store
            .update(
                "a",
                UserUpdate {
                    name: None,
                    email: Some("a@x.com".to_string()),
                },
            )
            .unwrap();
        assert_eq!(updated.name.as_deref(), Some("Alice"));
        assert_eq!(updated.email.as_deref(), Some("a@x.com"));

        let patched = store
            .patch(
                "a",
                UserPatch {
                    name: Some(Some("Alicia".to_string())),
                    email: None,
                },
            )
            .unwrap();
        assert_eq!(patched.name.as_deref(), Some("Alicia"));
        assert_eq!(patched.email.as_deref(), Some("a@x.com"));

        assert_eq!(store.get("a"), Some(patched));
    }

    #[test]
    fn test_missing_ids() {
        let store = UserStore::new();

        assert_eq!(store.update("x", UserUpdate::default()), None);
        assert_eq!(store.patch("x", UserPatch::default()), None);
        assert_eq!(store.remove("x"), None);
    }

    #[test]
    fn test_concurrent_inserts() {
        let store = UserStore::new();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for j in 0..100 {
                        store.insert(user(&format!("{i}-{j}"), "x"));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 800);
    }
}
