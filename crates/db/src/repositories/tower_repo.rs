//! Repository for the `towers` and `provider_towers` tables.

use std::collections::HashMap;

use sqlx::{FromRow, PgPool};
use towertrack_core::tower::TowerStatus;
use towertrack_core::types::DbId;

use crate::models::provider::Provider;
use crate::models::tower::{CreateTower, Tower, TowerWithProviders, UpdateTower};

/// Column list for the `towers` table.
const COLUMNS: &str = "id, latitude, longitude, village, district, address, height, \
    tower_type, photo_url, status, deleted_at, created_at, updated_at";

/// Column list for the `providers` table (used in JOIN queries).
const PROVIDER_COLUMNS: &str = "p.id, p.name, p.address, p.deleted_at, p.created_at, p.updated_at";

/// A provider row tagged with the tower it is linked to.
#[derive(FromRow)]
struct LinkedProvider {
    tower_id: DbId,
    #[sqlx(flatten)]
    provider: Provider,
}

/// Provides CRUD operations for towers and their provider associations.
///
/// Reads exclude soft-deleted towers unless the method name says otherwise.
pub struct TowerRepo;

impl TowerRepo {
    /// Insert a new `active` tower and its provider links in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTower,
    ) -> Result<TowerWithProviders, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO towers \
                (latitude, longitude, village, district, address, height, tower_type, photo_url, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        let tower = sqlx::query_as::<_, Tower>(&insert_query)
            .bind(input.coordinates.latitude)
            .bind(input.coordinates.longitude)
            .bind(&input.details.village)
            .bind(&input.details.district)
            .bind(&input.details.address)
            .bind(input.details.height)
            .bind(&input.details.tower_type)
            .bind(&input.photo_url)
            .bind(TowerStatus::Active.as_str())
            .fetch_one(&mut *tx)
            .await?;

        Self::set_providers_inner(&mut tx, tower.id, &input.provider_ids).await?;

        tx.commit().await?;
        Self::with_providers(pool, tower).await
    }

    /// Find a tower by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tower>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM towers WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Tower>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a tower by ID, including soft-deleted rows. Used by permanent delete.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Tower>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM towers WHERE id = $1");
        sqlx::query_as::<_, Tower>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a live tower by ID, enriched with its providers.
    pub async fn find_by_id_with_providers(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TowerWithProviders>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(tower) => Ok(Some(Self::with_providers(pool, tower).await?)),
            None => Ok(None),
        }
    }

    /// List all live towers, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Tower>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM towers WHERE deleted_at IS NULL ORDER BY id");
        sqlx::query_as::<_, Tower>(&query).fetch_all(pool).await
    }

    /// List all live towers with their providers.
    pub async fn list_with_providers(
        pool: &PgPool,
    ) -> Result<Vec<TowerWithProviders>, sqlx::Error> {
        let towers = Self::list(pool).await?;
        let ids: Vec<DbId> = towers.iter().map(|t| t.id).collect();
        let mut by_tower = Self::get_providers_for_towers(pool, &ids).await?;

        Ok(towers
            .into_iter()
            .map(|tower| {
                let providers = by_tower.remove(&tower.id).unwrap_or_default();
                TowerWithProviders { tower, providers }
            })
            .collect())
    }

    /// Overwrite a tower's mutable columns and, if given, its provider set.
    ///
    /// Both writes happen in one transaction. Returns `None` if no live row
    /// with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTower,
    ) -> Result<Option<TowerWithProviders>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE towers SET \
                latitude = $2, \
                longitude = $3, \
                village = $4, \
                district = $5, \
                address = $6, \
                height = $7, \
                tower_type = $8, \
                photo_url = $9 \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        let tower = sqlx::query_as::<_, Tower>(&update_query)
            .bind(id)
            .bind(input.coordinates.latitude)
            .bind(input.coordinates.longitude)
            .bind(&input.details.village)
            .bind(&input.details.district)
            .bind(&input.details.address)
            .bind(input.details.height)
            .bind(&input.details.tower_type)
            .bind(&input.photo_url)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(tower) = tower else {
            return Ok(None);
        };

        if let Some(ref provider_ids) = input.provider_ids {
            Self::set_providers_inner(&mut tx, tower.id, provider_ids).await?;
        }

        tx.commit().await?;
        Ok(Some(Self::with_providers(pool, tower).await?))
    }

    /// Overwrite a tower's coordinates. Returns `None` if the tower is missing.
    pub async fn set_coordinates(
        pool: &PgPool,
        id: DbId,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<Tower>, sqlx::Error> {
        let query = format!(
            "UPDATE towers SET latitude = $2, longitude = $3 \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tower>(&query)
            .bind(id)
            .bind(latitude)
            .bind(longitude)
            .fetch_optional(pool)
            .await
    }

    /// Set a tower's lifecycle status. Returns `None` if the tower is missing.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: TowerStatus,
    ) -> Result<Option<Tower>, sqlx::Error> {
        let query = format!(
            "UPDATE towers SET status = $2 \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tower>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a tower. Returns `true` if a row was marked.
    ///
    /// No route soft-deletes; tests use this to exercise the `deleted_at`
    /// filters and the permanent delete of soft-deleted rows.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE towers SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a tower; provider links cascade, events stay.
    ///
    /// Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM towers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Provider association helpers
    // -----------------------------------------------------------------------

    /// Live providers linked to a tower, ordered by name.
    pub async fn get_providers_for_tower(
        pool: &PgPool,
        tower_id: DbId,
    ) -> Result<Vec<Provider>, sqlx::Error> {
        let query = format!(
            "SELECT {PROVIDER_COLUMNS} \
             FROM providers p \
             JOIN provider_towers pt ON pt.provider_id = p.id \
             WHERE pt.tower_id = $1 AND p.deleted_at IS NULL \
             ORDER BY p.name"
        );
        sqlx::query_as::<_, Provider>(&query)
            .bind(tower_id)
            .fetch_all(pool)
            .await
    }

    /// Live providers of several towers in one query, keyed by tower id.
    ///
    /// Towers without providers have no entry. Each list is ordered by name.
    pub async fn get_providers_for_towers(
        pool: &PgPool,
        tower_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Provider>>, sqlx::Error> {
        let query = format!(
            "SELECT pt.tower_id, {PROVIDER_COLUMNS} \
             FROM providers p \
             JOIN provider_towers pt ON pt.provider_id = p.id \
             WHERE pt.tower_id = ANY($1) AND p.deleted_at IS NULL \
             ORDER BY pt.tower_id, p.name"
        );
        let rows = sqlx::query_as::<_, LinkedProvider>(&query)
            .bind(tower_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<Provider>> = HashMap::new();
        for row in rows {
            grouped.entry(row.tower_id).or_default().push(row.provider);
        }
        Ok(grouped)
    }

    /// Replace the whole provider set of a tower.
    pub async fn replace_providers(
        pool: &PgPool,
        tower_id: DbId,
        provider_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        Self::set_providers_inner(&mut tx, tower_id, provider_ids).await?;
        tx.commit().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn with_providers(
        pool: &PgPool,
        tower: Tower,
    ) -> Result<TowerWithProviders, sqlx::Error> {
        let providers = Self::get_providers_for_tower(pool, tower.id).await?;
        Ok(TowerWithProviders { tower, providers })
    }

    /// Replace provider associations within an existing transaction.
    ///
    /// Duplicate ids in `provider_ids` collapse to one link.
    async fn set_providers_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        tower_id: DbId,
        provider_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM provider_towers WHERE tower_id = $1")
            .bind(tower_id)
            .execute(&mut **tx)
            .await?;

        for &provider_id in provider_ids {
            sqlx::query(
                "INSERT INTO provider_towers (tower_id, provider_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(tower_id)
            .bind(provider_id)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
