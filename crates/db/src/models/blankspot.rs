//! Blankspot (coverage-gap) area model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use towertrack_core::types::{DbId, Timestamp};

/// A row from the `blankspot_areas` table.
///
/// `coordinates` holds the polygon as a JSON array of `[lat, lon]` pairs.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlankspotArea {
    pub id: DbId,
    pub name: String,
    pub village: String,
    pub coordinates: serde_json::Value,
    #[serde(rename = "type")]
    pub category: String,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a blankspot area. The polygon must already be validated.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlankspot {
    pub name: String,
    pub village: String,
    pub coordinates: serde_json::Value,
    pub category: String,
    pub color: String,
}

/// DTO for updating a blankspot area. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBlankspot {
    pub name: Option<String>,
    pub village: Option<String>,
    pub coordinates: Option<serde_json::Value>,
    pub category: Option<String>,
    pub color: Option<String>,
}
