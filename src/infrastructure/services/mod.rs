//! Orchestration services

mod mutation_service;

pub use mutation_service::MutationService;
