//! Infrastructure layer - transport, query store and orchestration

pub mod http;
pub mod logging;
pub mod query;
pub mod services;

pub use http::RestUserGateway;
pub use query::QueryStore;
pub use services::MutationService;
