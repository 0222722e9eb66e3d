//! user-sync
//!
//! Client-side synchronization core for a remote User REST resource:
//! - field rules enforced before any mutation is dispatched
//! - a keyed query cache with single-flight collection reads
//! - mutation orchestration with invalidate-before-notify semantics
//!
//! The presentation layer (here, a CLI) renders whatever the cache
//! currently holds and forwards user intents into the core; it never
//! owns the data.

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use domain::user::UserGateway;
use infrastructure::{MutationService, QueryStore, RestUserGateway};

/// The wired synchronization core: query cache plus mutation service,
/// sharing one gateway.
pub struct SyncCore {
    pub queries: Arc<QueryStore>,
    pub mutations: Arc<MutationService>,
}

/// Wire the core against the configured remote REST surface.
pub fn create_sync_core(config: &AppConfig) -> Result<SyncCore, domain::DomainError> {
    let gateway = Arc::new(RestUserGateway::new(&config.remote)?);
    Ok(create_sync_core_with_gateway(gateway))
}

/// Wire the core against any gateway. Tests and embedders inject their
/// own transport here.
pub fn create_sync_core_with_gateway(gateway: Arc<dyn UserGateway>) -> SyncCore {
    let queries = Arc::new(QueryStore::new(Arc::clone(&gateway)));
    let mutations = Arc::new(MutationService::new(gateway, Arc::clone(&queries)));

    SyncCore { queries, mutations }
}
