//! Domain logic for the tower tracker.
//!
//! Everything here is free of I/O so the repository layer, the HTTP layer and
//! tests can share it: id/timestamp aliases, the domain error type, tower
//! lifecycle rules, the tower event vocabulary and snapshots, blankspot
//! validation, and photo transcoding.

pub mod blankspot;
pub mod error;
pub mod media;
pub mod tower;
pub mod tower_event;
pub mod types;
