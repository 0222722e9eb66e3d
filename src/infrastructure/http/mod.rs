//! HTTP transport

mod rest_gateway;

pub use rest_gateway::RestUserGateway;
