//! Mutation orchestration

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, warn};

use crate::domain::mutation::{Mutation, MutationOutcome, MutationSurface, Notification};
use crate::domain::query::USERS_KEY;
use crate::domain::user::{self, UserGateway};
use crate::domain::DomainError;
use crate::infrastructure::query::QueryStore;

const NOTIFICATION_BUFFER: usize = 16;

/// Orchestrates a single create/update/delete against the remote system.
///
/// Each submit runs one state machine:
/// `Validating -> Invalid | Sending -> Succeeded | Failed`. Validation
/// fully completes before any network call. On success the collection
/// key is invalidated before the success notification is emitted; on
/// failure the cache is left untouched so the prior view stands and the
/// user can retry. At most one outcome notification fires per submit,
/// and none at all once the originating surface has been dismissed.
pub struct MutationService {
    gateway: Arc<dyn UserGateway>,
    queries: Arc<QueryStore>,
    notifications: broadcast::Sender<Notification>,
}

impl MutationService {
    pub fn new(gateway: Arc<dyn UserGateway>, queries: Arc<QueryStore>) -> Self {
        let (notifications, _) = broadcast::channel(NOTIFICATION_BUFFER);
        Self {
            gateway,
            queries,
            notifications,
        }
    }

    /// Receiver for outcome notifications. Sending while no receiver is
    /// alive drops the event; toasts are fire-and-forget.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    /// Outcome notifications as a stream, for presentation layers that
    /// consume them reactively.
    pub fn notification_stream(&self) -> BroadcastStream<Notification> {
        BroadcastStream::new(self.subscribe())
    }

    /// Run one mutation to its terminal state.
    ///
    /// The `Err` path is reserved for internal store inconsistencies;
    /// every user-facing result, including transport failures, comes
    /// back as a `MutationOutcome`.
    pub async fn submit(
        &self,
        mutation: Mutation,
        surface: &MutationSurface,
    ) -> Result<MutationOutcome, DomainError> {
        // Validating: completes fully before any network call. Delete
        // carries no form payload and goes straight to sending.
        if let Some(draft) = mutation.draft() {
            if let Err(errors) = user::validate(draft) {
                debug!(
                    verb = mutation.verb(),
                    fields = errors.len(),
                    "payload rejected by field rules"
                );
                return Ok(MutationOutcome::Invalid(errors));
            }
        }

        // Sending
        let result = match &mutation {
            Mutation::Create(draft) => self.gateway.create(draft).await.map(|_| ()),
            Mutation::Update(id, draft) => self.gateway.update(*id, draft).await.map(|_| ()),
            Mutation::Delete(id) => self.gateway.delete(*id).await,
        };

        match result {
            Ok(()) => {
                // Invalidate happens-before the success notification: the
                // cache must never present data known to be superseded by
                // this mutation.
                self.queries.invalidate(USERS_KEY).await?;
                debug!(verb = mutation.verb(), "mutation acknowledged");

                if !surface.is_dismissed() {
                    self.notify(Notification::success(mutation.success_message()));
                    surface.request_close();
                }
                Ok(MutationOutcome::Succeeded)
            }
            Err(err) => {
                warn!(verb = mutation.verb(), error = %err, "mutation failed");
                if !surface.is_dismissed() {
                    self.notify(Notification::failure(mutation.failure_message()));
                }
                Ok(MutationOutcome::Failed(err))
            }
        }
    }

    fn notify(&self, notification: Notification) {
        let _ = self.notifications.send(notification);
    }
}
