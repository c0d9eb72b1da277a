//! Tower entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use towertrack_core::tower::{Coordinates, TowerAspects, TowerDetails, TowerStatus};
use towertrack_core::tower_event::TowerSnapshot;
use towertrack_core::types::{DbId, Timestamp};

use crate::models::provider::Provider;

/// A row from the `towers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tower {
    pub id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub village: String,
    pub district: String,
    pub address: String,
    pub height: f64,
    pub tower_type: String,
    pub photo_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: TowerStatus,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Tower {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn details(&self) -> TowerDetails {
        TowerDetails {
            village: self.village.clone(),
            district: self.district.clone(),
            address: self.address.clone(),
            height: self.height,
            tower_type: self.tower_type.clone(),
        }
    }
}

/// A tower enriched with its (non-deleted) providers.
#[derive(Debug, Clone, Serialize)]
pub struct TowerWithProviders {
    #[serde(flatten)]
    pub tower: Tower,
    pub providers: Vec<Provider>,
}

impl TowerWithProviders {
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name.clone()).collect()
    }

    /// The aspects an update request can change, for event classification.
    pub fn aspects(&self) -> TowerAspects {
        TowerAspects {
            coordinates: self.tower.coordinates(),
            photo_url: self.tower.photo_url.clone(),
            providers: self.providers.iter().map(Provider::to_ref).collect(),
            details: self.tower.details(),
        }
    }

    /// Full-state snapshot recorded with the `Created` event.
    pub fn snapshot(&self) -> TowerSnapshot {
        let t = &self.tower;
        TowerSnapshot {
            latitude: t.latitude,
            longitude: t.longitude,
            village: t.village.clone(),
            district: t.district.clone(),
            address: t.address.clone(),
            height: t.height,
            tower_type: t.tower_type.clone(),
            photo_url: t.photo_url.clone(),
            providers: self.provider_names(),
            status: t.status,
        }
    }
}

/// DTO for inserting a new tower. New towers always start `active`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTower {
    pub coordinates: Coordinates,
    pub details: TowerDetails,
    pub photo_url: Option<String>,
    pub provider_ids: Vec<DbId>,
}

/// DTO for overwriting a tower's mutable columns.
///
/// Callers merge the request into the current state first, so every field is
/// concrete. `provider_ids: None` leaves the association untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTower {
    pub coordinates: Coordinates,
    pub details: TowerDetails,
    pub photo_url: Option<String>,
    pub provider_ids: Option<Vec<DbId>>,
}
