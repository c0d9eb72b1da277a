//! Repository for the `providers` table.

use sqlx::PgPool;
use towertrack_core::types::DbId;

use crate::models::provider::{CreateProvider, Provider, UpdateProvider};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, address, deleted_at, created_at, updated_at";

/// Provides CRUD operations for providers.
///
/// Reads exclude soft-deleted rows; [`ProviderRepo::hard_delete`] removes a
/// row regardless of its soft-delete state.
pub struct ProviderRepo;

impl ProviderRepo {
    /// Insert a new provider, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProvider) -> Result<Provider, sqlx::Error> {
        let query = format!("INSERT INTO providers (name, address) VALUES ($1, $2) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Provider>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .fetch_one(pool)
            .await
    }

    /// Find a provider by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Provider>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM providers WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Provider>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a provider by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Provider>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM providers WHERE id = $1");
        sqlx::query_as::<_, Provider>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find all live providers whose ids are in `ids`, ordered by id.
    pub async fn find_many(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Provider>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM providers \
             WHERE id = ANY($1) AND deleted_at IS NULL \
             ORDER BY id"
        );
        sqlx::query_as::<_, Provider>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List all live providers ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Provider>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM providers WHERE deleted_at IS NULL ORDER BY name");
        sqlx::query_as::<_, Provider>(&query).fetch_all(pool).await
    }

    /// Update a provider. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProvider,
    ) -> Result<Option<Provider>, sqlx::Error> {
        let query = format!(
            "UPDATE providers SET
                name = COALESCE($2, name),
                address = COALESCE($3, address)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Provider>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a provider. Returns `true` if a row was marked.
    ///
    /// No route soft-deletes; tests use this to exercise the `deleted_at`
    /// filters on provider reads and tower provider lists.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE providers SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a provider. Its tower associations cascade away.
    ///
    /// Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM providers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
