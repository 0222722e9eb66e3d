//! CLI for the synchronization core
//!
//! The subcommands are the presentation layer: they render whatever the
//! query cache currently holds, forward create/update/delete intents
//! into the mutation service, and display outcome notifications. They
//! never own or write the data themselves.

pub mod create;
pub mod delete;
pub mod list;
pub mod render;
pub mod update;

use clap::{Parser, Subcommand};
use futures::{FutureExt, StreamExt};

use crate::config::AppConfig;
use crate::domain::mutation::{Mutation, MutationOutcome, MutationSurface};
use crate::domain::query::{QueryState, USERS_KEY};
use crate::domain::DomainError;
use crate::infrastructure::logging;
use crate::{create_sync_core, SyncCore};

/// User directory client for a remote REST API
#[derive(Parser)]
#[command(name = "user-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List users, with an optional local name filter
    List(list::ListArgs),
    /// Create a user from form field values
    Create(create::CreateArgs),
    /// Edit a persisted user (the username stays fixed)
    Update(update::UpdateArgs),
    /// Delete a user after confirmation
    Delete(delete::DeleteArgs),
}

pub(crate) fn bootstrap() -> anyhow::Result<SyncCore> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    Ok(create_sync_core(&config)?)
}

/// Drive one mutation to its terminal state and report it the way the
/// UI would: toasts for settled outcomes, inline annotations for field
/// errors, and a refreshed list after success.
pub(crate) async fn submit_and_report(core: &SyncCore, mutation: Mutation) -> anyhow::Result<()> {
    let mut notifications = core.mutations.notification_stream();
    let surface = MutationSurface::new();

    let outcome = core.mutations.submit(mutation, &surface).await?;
    while let Some(Some(Ok(notification))) = notifications.next().now_or_never() {
        render::print_notification(&notification);
    }

    match outcome {
        MutationOutcome::Invalid(errors) => {
            render::print_field_errors(&errors);
            Err(DomainError::from(errors).into())
        }
        MutationOutcome::Failed(err) => Err(err.into()),
        MutationOutcome::Succeeded => {
            // The next read re-fetches and reflects the post-mutation
            // state; show it.
            if let QueryState::Ready(users) = core.queries.settled(USERS_KEY).await? {
                render::print_table(&users.iter().collect::<Vec<_>>());
            }
            Ok(())
        }
    }
}
