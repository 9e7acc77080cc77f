use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

pub const USERS_COLLECTION: &str = "users";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub username: String,
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,

    pub created_at: DateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interests: Vec<String>,
}

impl User {
    /// A user without an id yet, stamped with the current instant.
    pub fn new(username: impl Into<String>, email: impl Into<String>, profile: Option<Profile>) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: email.into(),
            profile,
            created_at: DateTime::now(),
        }
    }
}

/// Input for a single user insert.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn into_user(self) -> User {
        // empty names count as absent
        let first_name = self.first_name.filter(|s| !s.is_empty());
        let last_name = self.last_name.filter(|s| !s.is_empty());

        // only store a profile when there is something to put in it
        let profile = if first_name.is_some() || last_name.is_some() || self.age.is_some() {
            Some(Profile {
                first_name,
                last_name,
                age: self.age,
                ..Default::default()
            })
        } else {
            None
        };

        User::new(self.username, self.email, profile)
    }
}
