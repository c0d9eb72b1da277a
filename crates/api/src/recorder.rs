//! Tower event recorder.
//!
//! Turns an [`EventDraft`] into one appended `tower_events` row tagged with
//! the acting user. Callers treat failures as warnings: the tower mutation
//! they describe is already committed and stays that way.

use towertrack_core::tower_event::EventDraft;
use towertrack_core::types::DbId;
use towertrack_db::models::tower_event::{CreateTowerEvent, TowerEvent};
use towertrack_db::repositories::TowerEventRepo;
use towertrack_db::DbPool;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Failed to serialize event snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to store tower event: {0}")]
    Store(#[from] sqlx::Error),
}

/// Append one event for `tower_id`, stamped with the current time.
pub async fn record(
    pool: &DbPool,
    tower_id: DbId,
    draft: EventDraft,
    actor: DbId,
) -> Result<TowerEvent, RecordError> {
    let input = CreateTowerEvent {
        tower_id,
        event_type: draft.kind,
        description: draft.description,
        old_data: draft.old_data.map(|s| s.to_json()).transpose()?,
        new_data: draft.new_data.map(|s| s.to_json()).transpose()?,
        user_id: actor,
    };

    Ok(TowerEventRepo::append(pool, &input).await?)
}

/// [`record`], logging instead of failing. Returns the event when stored.
pub async fn record_or_warn(
    pool: &DbPool,
    tower_id: DbId,
    draft: EventDraft,
    actor: DbId,
) -> Option<TowerEvent> {
    let kind = draft.kind;
    match record(pool, tower_id, draft, actor).await {
        Ok(event) => {
            tracing::debug!(tower_id, event_id = event.id, event_type = %kind, "Recorded tower event");
            Some(event)
        }
        Err(e) => {
            tracing::warn!(tower_id, event_type = %kind, error = %e, "Failed to record tower event");
            None
        }
    }
}
