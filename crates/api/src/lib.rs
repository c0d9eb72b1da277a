//! Tower tracker API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes, tower
//! operations) so integration tests and the binary entrypoint can both access
//! them.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod media;
pub mod middleware;
pub mod recorder;
pub mod response;
pub mod router;
pub mod routes;
pub mod seed;
pub mod state;
pub mod tower_ops;
