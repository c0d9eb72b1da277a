//! Repository for the `blankspot_areas` table.

use sqlx::PgPool;
use towertrack_core::types::DbId;

use crate::models::blankspot::{BlankspotArea, CreateBlankspot, UpdateBlankspot};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, village, coordinates, category, color, created_at, updated_at";

/// Provides CRUD operations for blankspot areas.
pub struct BlankspotRepo;

impl BlankspotRepo {
    /// Insert a new blankspot area, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateBlankspot,
    ) -> Result<BlankspotArea, sqlx::Error> {
        let query = format!(
            "INSERT INTO blankspot_areas (name, village, coordinates, category, color)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlankspotArea>(&query)
            .bind(&input.name)
            .bind(&input.village)
            .bind(&input.coordinates)
            .bind(&input.category)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    /// Find a blankspot area by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BlankspotArea>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blankspot_areas WHERE id = $1");
        sqlx::query_as::<_, BlankspotArea>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all blankspot areas ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<BlankspotArea>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blankspot_areas ORDER BY name");
        sqlx::query_as::<_, BlankspotArea>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a blankspot area. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlankspot,
    ) -> Result<Option<BlankspotArea>, sqlx::Error> {
        let query = format!(
            "UPDATE blankspot_areas SET
                name = COALESCE($2, name),
                village = COALESCE($3, village),
                coordinates = COALESCE($4, coordinates),
                category = COALESCE($5, category),
                color = COALESCE($6, color)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlankspotArea>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.village)
            .bind(&input.coordinates)
            .bind(&input.category)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a blankspot area. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blankspot_areas WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
