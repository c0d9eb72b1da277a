//! Tower mutation operations.
//!
//! Each operation validates its input, loads the current tower, persists the
//! change, and records exactly one tower event (or none, for an update that
//! changes nothing). Event recording is best effort: a failure is logged and
//! the committed mutation is still returned.

use towertrack_core::error::CoreError;
use towertrack_core::tower::{self, parse_height, Coordinates, TowerStatus};
use towertrack_core::tower_event::EventDraft;
use towertrack_core::types::DbId;
use towertrack_db::models::tower::{CreateTower, TowerWithProviders, UpdateTower};
use towertrack_db::models::tower_event::TowerEvent;
use towertrack_db::repositories::{ProviderRepo, TowerEventRepo, TowerRepo};

use crate::error::{AppError, AppResult};
use crate::media::{PhotoUpload, UploadedFile};
use crate::recorder::record_or_warn;
use crate::state::AppState;

/// Tower fields as received from a multipart form, still unparsed.
///
/// For create, `latitude` and `longitude` are required and everything else
/// defaults to empty. For update, `None` keeps the current value.
#[derive(Debug, Default)]
pub struct TowerForm {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub village: Option<String>,
    pub district: Option<String>,
    pub address: Option<String>,
    pub height: Option<String>,
    pub tower_type: Option<String>,
    /// `Some` as soon as any provider id part was sent, even an empty one.
    pub provider_ids: Option<Vec<DbId>>,
    pub photo: Option<UploadedFile>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Tower", id })
}

async fn load(state: &AppState, id: DbId) -> AppResult<TowerWithProviders> {
    TowerRepo::find_by_id_with_providers(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// Fail with 404 naming the first id that is not a live provider.
async fn ensure_providers_exist(state: &AppState, ids: &[DbId]) -> AppResult<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let found = ProviderRepo::find_many(&state.pool, ids).await?;
    match ids.iter().find(|id| !found.iter().any(|p| p.id == **id)) {
        Some(&missing) => Err(AppError::Core(CoreError::NotFound {
            entity: "Provider",
            id: missing,
        })),
        None => Ok(()),
    }
}

/// Store the uploaded photo, if any. A rejected image aborts the operation.
async fn store_photo(state: &AppState, photo: Option<UploadedFile>) -> AppResult<Option<String>> {
    match state.media.process(photo).await? {
        PhotoUpload::Absent => Ok(None),
        PhotoUpload::Stored { url } => Ok(Some(url)),
        PhotoUpload::Rejected(err) => Err(err.into()),
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> AppResult<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation(format!("Invalid {field} format"))))
}

fn optional_height(raw: &Option<String>) -> AppResult<Option<f64>> {
    match raw.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => Ok(Some(parse_height(v)?)),
        None => Ok(None),
    }
}

/// Create a tower and record a `Created` event with its full state.
pub async fn create(state: &AppState, actor: DbId, form: TowerForm) -> AppResult<TowerWithProviders> {
    let coordinates = Coordinates::parse(
        required(&form.latitude, "latitude")?,
        required(&form.longitude, "longitude")?,
    )?;
    let height = optional_height(&form.height)?.unwrap_or(0.0);
    let provider_ids = form.provider_ids.unwrap_or_default();
    ensure_providers_exist(state, &provider_ids).await?;

    let photo_url = store_photo(state, form.photo).await?;

    let input = CreateTower {
        coordinates,
        details: tower::TowerDetails {
            village: form.village.unwrap_or_default(),
            district: form.district.unwrap_or_default(),
            address: form.address.unwrap_or_default(),
            height,
            tower_type: form.tower_type.unwrap_or_default(),
        },
        photo_url,
        provider_ids,
    };
    let created = TowerRepo::create(&state.pool, &input).await?;
    tracing::info!(tower_id = created.tower.id, user_id = actor, "Tower created");

    record_or_warn(
        &state.pool,
        created.tower.id,
        EventDraft::created(created.snapshot()),
        actor,
    )
    .await;

    Ok(created)
}

/// Apply a partial update and record the single highest-precedence change.
pub async fn update(
    state: &AppState,
    id: DbId,
    actor: DbId,
    form: TowerForm,
) -> AppResult<TowerWithProviders> {
    let before = load(state, id).await?;
    let current = &before.tower;

    let coordinates = match (&form.latitude, &form.longitude) {
        (None, None) => current.coordinates(),
        (lat, lon) => {
            let lat = lat
                .clone()
                .unwrap_or_else(|| current.latitude.to_string());
            let lon = lon
                .clone()
                .unwrap_or_else(|| current.longitude.to_string());
            Coordinates::parse(&lat, &lon)?
        }
    };

    let mut details = current.details();
    if let Some(height) = optional_height(&form.height)? {
        details.height = height;
    }
    if let Some(village) = form.village {
        details.village = village;
    }
    if let Some(district) = form.district {
        details.district = district;
    }
    if let Some(address) = form.address {
        details.address = address;
    }
    if let Some(tower_type) = form.tower_type {
        details.tower_type = tower_type;
    }

    if let Some(ref ids) = form.provider_ids {
        ensure_providers_exist(state, ids).await?;
    }

    let new_photo = store_photo(state, form.photo).await?;
    let replaced_photo = new_photo.as_ref().and(current.photo_url.clone());

    let input = UpdateTower {
        coordinates,
        details,
        photo_url: new_photo.or_else(|| current.photo_url.clone()),
        provider_ids: form.provider_ids,
    };
    let after = TowerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(old_url) = replaced_photo {
        state.media.remove(&old_url).await;
    }

    match tower::update_event(&before.aspects(), &after.aspects()) {
        Some(draft) => {
            record_or_warn(&state.pool, id, draft, actor).await;
        }
        None => tracing::debug!(tower_id = id, "Tower update changed nothing, no event"),
    }

    Ok(after)
}

/// Replace the provider set with exactly `{new_provider_id}`.
pub async fn change_ownership(
    state: &AppState,
    id: DbId,
    actor: DbId,
    new_provider_id: DbId,
) -> AppResult<TowerWithProviders> {
    let before = load(state, id).await?;
    let provider = ProviderRepo::find_by_id(&state.pool, new_provider_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Provider",
            id: new_provider_id,
        }))?;

    TowerRepo::replace_providers(&state.pool, id, &[provider.id]).await?;
    let after = load(state, id).await?;

    record_or_warn(
        &state.pool,
        id,
        EventDraft::ownership_change(before.provider_names(), vec![provider.name]),
        actor,
    )
    .await;

    Ok(after)
}

/// Move a tower. Recorded even when the coordinates are unchanged.
pub async fn relocate(
    state: &AppState,
    id: DbId,
    actor: DbId,
    to: Coordinates,
) -> AppResult<TowerWithProviders> {
    let before = load(state, id).await?;

    TowerRepo::set_coordinates(&state.pool, id, to.latitude, to.longitude)
        .await?
        .ok_or_else(|| not_found(id))?;
    let after = load(state, id).await?;

    record_or_warn(
        &state.pool,
        id,
        EventDraft::relocation(before.tower.coordinates(), after.tower.coordinates()),
        actor,
    )
    .await;

    Ok(after)
}

/// Mark a tower dismantled. Recorded even when it already was.
pub async fn dismantle(state: &AppState, id: DbId, actor: DbId) -> AppResult<TowerWithProviders> {
    let before = load(state, id).await?;

    TowerRepo::set_status(&state.pool, id, TowerStatus::Dismantled)
        .await?
        .ok_or_else(|| not_found(id))?;
    let after = load(state, id).await?;

    record_or_warn(
        &state.pool,
        id,
        EventDraft::dismantled(before.tower.status),
        actor,
    )
    .await;

    Ok(after)
}

/// Permanently delete a tower (soft-deleted rows included) and its photo.
///
/// Recorded as a `Dismantled` event; the history outlives the row.
pub async fn delete(state: &AppState, id: DbId, actor: DbId) -> AppResult<()> {
    let tower = TowerRepo::find_by_id_include_deleted(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if !TowerRepo::hard_delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(tower_id = id, user_id = actor, "Tower deleted");

    if let Some(ref url) = tower.photo_url {
        state.media.remove(url).await;
    }

    record_or_warn(&state.pool, id, EventDraft::deleted(tower.status), actor).await;
    Ok(())
}

/// Newest-first history. Empty for ids that never existed.
pub async fn history(state: &AppState, id: DbId) -> AppResult<Vec<TowerEvent>> {
    Ok(TowerEventRepo::list_for_tower(&state.pool, id).await?)
}
