//! Tower event (history) entity model and DTO.
//!
//! Tower events are append-only: there is no update DTO and no `updated_at`.
//! `tower_id` is not a foreign key, so rows outlive a hard-deleted tower.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use towertrack_core::tower_event::TowerEventKind;
use towertrack_core::types::{DbId, Timestamp};

/// A row from the `tower_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TowerEvent {
    pub id: DbId,
    pub tower_id: DbId,
    #[sqlx(try_from = "String")]
    pub event_type: TowerEventKind,
    pub timestamp: Timestamp,
    pub description: String,
    pub old_data: Option<serde_json::Value>,
    pub new_data: Option<serde_json::Value>,
    pub user_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for appending a tower event. Snapshots are already serialized.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTowerEvent {
    pub tower_id: DbId,
    pub event_type: TowerEventKind,
    pub description: String,
    pub old_data: Option<serde_json::Value>,
    pub new_data: Option<serde_json::Value>,
    pub user_id: DbId,
}
