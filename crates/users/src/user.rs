use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Name carried by the notification published when a user is deleted.
///
/// Stored users may carry this name too. Consumers tell deletions apart by
/// the [`EVENT_HEADER`] set to [`DELETED_EVENT`], never by the payload.
pub const DELETION_MARKER: &str = "DELETED";

/// Header naming the kind of change a user message reports.
pub const EVENT_HEADER: &str = "userbus-event";

/// [`EVENT_HEADER`] value of a deletion notification.
pub const DELETED_EVENT: &str = "deleted";

/// The user envelope stored by the API and exchanged through the broker.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier, unique by convention only.
    pub id: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    /// The notification published in place of a deleted user.
    pub fn deletion_marker<K: Into<String>>(id: K) -> Self {
        Self {
            id: id.into(),
            name: Some(DELETION_MARKER.to_string()),
            email: None,
        }
    }

    /// Overwrites the fields that are set in `update`.
    pub fn apply_update(&mut self, update: UserUpdate) {
        if let Some(name) = update.name {
            self.name = Some(name);
        }
        if let Some(email) = update.email {
            self.email = Some(email);
        }
    }

    /// Overwrites the fields that are present in `patch`, including
    /// explicit nulls.
    pub fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User(id={}, name={}, email={})",
            self.id,
            self.name.as_deref().unwrap_or("null"),
            self.email.as_deref().unwrap_or("null")
        )
    }
}

impl TryFrom<Bytes> for User {
    type Error = serde_json::Error;

    fn try_from(bytes: Bytes) -> Result<Self, Self::Error> {
        serde_json::from_slice(&bytes)
    }
}

impl TryFrom<User> for Bytes {
    type Error = serde_json::Error;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        serde_json::to_vec(&user).map(Self::from)
    }
}

/// Body of a create request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Identifier to use. Generated when missing or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl NewUser {
    /// Builds the user to store, generating an identifier if needed.
    #[must_use]
    pub fn into_user(self) -> User {
        let id = match self.id {
            Some(id) if !id.is_empty() => id,
            _ => Uuid::new_v4().to_string(),
        };

        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

/// Body of a full update: `null` or missing fields keep their value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,

    /// New email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of a partial update: missing fields are untouched, present fields
/// are written as given (`null` clears).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    /// Display name, if present in the body.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<Option<String>>,

    /// Email address, if present in the body.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<Option<String>>,
}

// Only called for keys that appear in the input, so `null` becomes
// `Some(None)` while a missing key stays `None` through `default`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
