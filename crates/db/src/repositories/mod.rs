//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod blankspot_repo;
pub mod provider_repo;
pub mod tower_event_repo;
pub mod tower_repo;
pub mod user_repo;

pub use blankspot_repo::BlankspotRepo;
pub use provider_repo::ProviderRepo;
pub use tower_event_repo::TowerEventRepo;
pub use tower_repo::TowerRepo;
pub use user_repo::UserRepo;
