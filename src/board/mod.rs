//! Task board bounded context.
//!
//! The board keeps tasks in three ordered lanes (`todo`, `doing`, `done`),
//! records an append-only audit trail for every mutation, filters tasks with
//! a compact query grammar, and merges imported JSON documents. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Query parsing and evaluation in [`query`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod query;
pub mod services;

#[cfg(test)]
mod tests;
