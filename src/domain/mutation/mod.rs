//! Mutation vocabulary
//!
//! The intents a presentation layer can submit, the terminal outcome of
//! one submission, and the notification/surface types that carry its
//! effects back out.

mod notification;
mod surface;

pub use notification::{Notification, NotificationKind};
pub use surface::MutationSurface;

use crate::domain::error::DomainError;
use crate::domain::user::{FieldErrors, UserDraft, UserId};

/// A single user intent: create, edit or delete.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create(UserDraft),
    Update(UserId, UserDraft),
    Delete(UserId),
}

impl Mutation {
    /// Form payload, for the kinds that carry one. Delete has no form.
    pub fn draft(&self) -> Option<&UserDraft> {
        match self {
            Self::Create(draft) | Self::Update(_, draft) => Some(draft),
            Self::Delete(_) => None,
        }
    }

    /// Verb for log lines
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::Update(..) => "update",
            Self::Delete(_) => "delete",
        }
    }

    pub(crate) fn success_message(&self) -> &'static str {
        match self {
            Self::Create(_) => "User created successfully",
            Self::Update(..) => "User updated successfully",
            Self::Delete(_) => "User deleted successfully",
        }
    }

    pub(crate) fn failure_message(&self) -> &'static str {
        match self {
            Self::Create(_) | Self::Update(..) => "An error occurred",
            Self::Delete(_) => "An error occurred while deleting the user",
        }
    }
}

/// Terminal result of one submit invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// Field rules rejected the payload; the gateway was never contacted.
    Invalid(FieldErrors),
    /// The remote acknowledged the mutation and the collection key was
    /// invalidated.
    Succeeded,
    /// The remote rejected or never received the request; the cache was
    /// left untouched.
    Failed(DomainError),
}

impl MutationOutcome {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}
