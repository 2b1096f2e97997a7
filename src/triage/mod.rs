//! Domain layer: record types and the pure triage services
//! (request building, response contract, dashboard metrics).

pub mod domain;
pub mod services;
