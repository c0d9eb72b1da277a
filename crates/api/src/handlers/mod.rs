//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource. Handlers
//! delegate to the repositories in `towertrack_db` (or to [`crate::tower_ops`]
//! for tower mutations) and map errors via [`crate::error::AppError`].

pub mod auth;
pub mod blankspot;
pub mod provider;
pub mod tower;
