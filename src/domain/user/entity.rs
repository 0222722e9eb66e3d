//! User entity and the remote JSON shape

use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote system when a create succeeds.
///
/// A record without one is a draft; once assigned it never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner numeric value
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Employer block of the remote record. The name is optional on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Company {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Postal block of the remote record. Unknown remote fields (suite,
/// zipcode, geo) are ignored on read and never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Address {
    pub street: String,
    pub city: String,
}

/// Form state prior to a successful create. Carries no id: the remote
/// system assigns one when the create is acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub username: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub company: Company,
    pub address: Address,
}

/// A record acknowledged by the remote system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub username: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub company: Company,
    pub address: Address,
}

impl User {
    /// Seed an edit form from this record.
    ///
    /// The returned draft carries the persisted username; edit surfaces
    /// must not let it change (updates always send it back verbatim).
    pub fn draft(&self) -> UserDraft {
        UserDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            username: self.username.clone(),
            website: self.website.clone(),
            company: self.company.clone(),
            address: self.address.clone(),
        }
    }

    /// Build the persisted record from a remote-acknowledged draft.
    pub fn from_draft(id: UserId, draft: UserDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            username: draft.username,
            website: draft.website,
            company: draft.company,
            address: draft.address,
        }
    }
}
