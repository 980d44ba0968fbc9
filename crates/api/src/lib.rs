//! Asset admin API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! asset orchestration) so integration tests and the binary entrypoint can
//! both access them.

pub mod assets;
pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
