//! Handlers for the `/towers` resource.
//!
//! Create and update take `multipart/form-data` so a photo can ride along;
//! the lifecycle actions (ownership, relocate, dismantle) take JSON.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use towertrack_core::error::CoreError;
use towertrack_core::tower::Coordinates;
use towertrack_core::types::DbId;
use towertrack_db::models::tower::TowerWithProviders;
use towertrack_db::models::tower_event::TowerEvent;
use towertrack_db::repositories::TowerRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::media::UploadedFile;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::tower_ops::{self, TowerForm};

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PUT /towers/{id}/ownership`.
#[derive(Debug, Deserialize)]
pub struct ChangeOwnershipRequest {
    pub new_provider_id: DbId,
}

/// Request body for `PUT /towers/{id}/relocate`.
#[derive(Debug, Deserialize)]
pub struct RelocateRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl RelocateRequest {
    fn coordinates(&self) -> AppResult<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)?),
            _ => Err(AppError::Core(CoreError::Validation(
                "Both latitude and longitude are required".into(),
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Multipart form parsing
// ---------------------------------------------------------------------------

/// Form parts understood by the tower endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TowerField {
    Latitude,
    Longitude,
    Village,
    District,
    Address,
    Height,
    TowerType,
    ProviderIds,
    Photo,
}

/// Map a form part name to its field. Older clients send the Indonesian
/// names (`kelurahan`, `kecamatan`, `tinggi`, `tipe`).
fn classify_field(name: &str) -> Option<TowerField> {
    let field = match name {
        "latitude" => TowerField::Latitude,
        "longitude" => TowerField::Longitude,
        "village" | "kelurahan" => TowerField::Village,
        "district" | "kecamatan" => TowerField::District,
        "address" => TowerField::Address,
        "height" | "tinggi" => TowerField::Height,
        "tower_type" | "tipe" => TowerField::TowerType,
        "provider_ids" | "provider_ids[]" => TowerField::ProviderIds,
        "photo" => TowerField::Photo,
        _ => return None,
    };
    Some(field)
}

/// Parse one `provider_ids` part, which may itself be a comma list.
fn parse_provider_ids(raw: &str) -> AppResult<Vec<DbId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<DbId>().map_err(|_| {
                AppError::Core(CoreError::Validation(format!("Invalid provider id '{s}'")))
            })
        })
        .collect()
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::BadRequest(e.to_string())
}

/// Drain a multipart body into a [`TowerForm`]. Unknown parts are ignored.
async fn read_tower_form(mut multipart: Multipart) -> AppResult<TowerForm> {
    let mut form = TowerForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(kind) = field.name().and_then(classify_field) else {
            continue;
        };

        if kind == TowerField::Photo {
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await.map_err(multipart_error)?;
            form.photo = Some(UploadedFile {
                file_name,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let text = field.text().await.map_err(multipart_error)?;
        match kind {
            TowerField::Latitude => form.latitude = Some(text),
            TowerField::Longitude => form.longitude = Some(text),
            TowerField::Village => form.village = Some(text),
            TowerField::District => form.district = Some(text),
            TowerField::Address => form.address = Some(text),
            TowerField::Height => form.height = Some(text),
            TowerField::TowerType => form.tower_type = Some(text),
            TowerField::ProviderIds => form
                .provider_ids
                .get_or_insert_with(Vec::new)
                .extend(parse_provider_ids(&text)?),
            TowerField::Photo => {}
        }
    }

    Ok(form)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/towers
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<TowerWithProviders>>>> {
    let towers = TowerRepo::list_with_providers(&state.pool).await?;
    Ok(ApiResponse::ok("Towers fetched successfully", towers))
}

/// GET /api/towers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<TowerWithProviders>>> {
    let tower = TowerRepo::find_by_id_with_providers(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tower",
            id,
        }))?;
    Ok(ApiResponse::ok("Tower fetched successfully", tower))
}

/// POST /api/towers
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<TowerWithProviders>>)> {
    let form = read_tower_form(multipart).await?;
    let tower = tower_ops::create(&state, auth.user_id, form).await?;
    Ok(ApiResponse::created("Tower created successfully", tower))
}

/// PUT /api/towers/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<TowerWithProviders>>> {
    let form = read_tower_form(multipart).await?;
    let tower = tower_ops::update(&state, id, auth.user_id, form).await?;
    Ok(ApiResponse::ok("Tower updated successfully", tower))
}

/// DELETE /api/towers/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<Option<()>>>> {
    tower_ops::delete(&state, id, auth.user_id).await?;
    Ok(ApiResponse::message("Tower deleted successfully"))
}

/// PUT /api/towers/{id}/ownership
pub async fn change_ownership(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ChangeOwnershipRequest>,
) -> AppResult<Json<ApiResponse<TowerWithProviders>>> {
    let tower = tower_ops::change_ownership(&state, id, auth.user_id, input.new_provider_id).await?;
    Ok(ApiResponse::ok("Tower ownership changed successfully", tower))
}

/// PUT /api/towers/{id}/relocate
pub async fn relocate(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<RelocateRequest>,
) -> AppResult<Json<ApiResponse<TowerWithProviders>>> {
    let to = input.coordinates()?;
    let tower = tower_ops::relocate(&state, id, auth.user_id, to).await?;
    Ok(ApiResponse::ok("Tower relocated successfully", tower))
}

/// PUT /api/towers/{id}/dismantle
pub async fn dismantle(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<TowerWithProviders>>> {
    let tower = tower_ops::dismantle(&state, id, auth.user_id).await?;
    Ok(ApiResponse::ok("Tower dismantled successfully", tower))
}

/// GET /api/towers/{id}/history
pub async fn history(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<Vec<TowerEvent>>>> {
    let events = tower_ops::history(&state, id).await?;
    Ok(ApiResponse::ok("Tower history fetched successfully", events))
}
