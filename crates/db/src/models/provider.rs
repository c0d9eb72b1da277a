//! Provider (tower operator) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use towertrack_core::tower::ProviderRef;
use towertrack_core::types::{DbId, Timestamp};

/// A row from the `providers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Provider {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Provider {
    pub fn to_ref(&self) -> ProviderRef {
        ProviderRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// DTO for creating a new provider.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProvider {
    pub name: String,
    pub address: String,
}

/// DTO for updating a provider. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProvider {
    pub name: Option<String>,
    pub address: Option<String>,
}
