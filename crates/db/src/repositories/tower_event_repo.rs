//! Repository for the append-only `tower_events` table.
//!
//! No update or delete methods. The table's trigger
//! rejects both at the database level as well.

use sqlx::PgPool;
use towertrack_core::types::DbId;

use crate::models::tower_event::{CreateTowerEvent, TowerEvent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tower_id, event_type, timestamp, description, \
                       old_data, new_data, user_id, created_at";

/// Provides append and history queries for tower events.
pub struct TowerEventRepo;

impl TowerEventRepo {
    /// Append one event stamped with the current time.
    pub async fn append(
        pool: &PgPool,
        input: &CreateTowerEvent,
    ) -> Result<TowerEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO tower_events
                (tower_id, event_type, description, old_data, new_data, user_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TowerEvent>(&query)
            .bind(input.tower_id)
            .bind(input.event_type.as_str())
            .bind(&input.description)
            .bind(&input.old_data)
            .bind(&input.new_data)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// History of one tower, newest first. Works for hard-deleted towers too.
    pub async fn list_for_tower(
        pool: &PgPool,
        tower_id: DbId,
    ) -> Result<Vec<TowerEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tower_events
             WHERE tower_id = $1
             ORDER BY timestamp DESC, id DESC"
        );
        sqlx::query_as::<_, TowerEvent>(&query)
            .bind(tower_id)
            .fetch_all(pool)
            .await
    }
}
