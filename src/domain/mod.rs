//! Domain layer - entities, field rules and the synchronization vocabulary

pub mod error;
pub mod mutation;
pub mod query;
pub mod user;

pub use error::DomainError;
pub use mutation::{Mutation, MutationOutcome, MutationSurface, Notification, NotificationKind};
pub use query::{QueryState, USERS_KEY};
pub use user::{validate, FieldErrors, User, UserDraft, UserGateway, UserId};
