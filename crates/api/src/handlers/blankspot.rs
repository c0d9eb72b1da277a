//! Handlers for the `/blankspots` resource (coverage-gap polygons).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use towertrack_core::blankspot::{parse_polygon, validate_color};
use towertrack_core::error::CoreError;
use towertrack_core::types::DbId;
use towertrack_db::models::blankspot::{BlankspotArea, CreateBlankspot, UpdateBlankspot};
use towertrack_db::repositories::BlankspotRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

const DEFAULT_CATEGORY: &str = "Blankspot";
const DEFAULT_COLOR: &str = "#FF0000";

/// Request body for `POST /blankspots`.
///
/// `coordinates` may be a JSON array of `[lat, lon]` pairs or a string
/// holding that array.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBlankspotRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    #[serde(default, alias = "kelurahan")]
    pub village: String,
    pub coordinates: Value,
    #[serde(default, rename = "type", alias = "category")]
    pub category: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Request body for `PUT /blankspots/{id}`. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBlankspotRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,
    #[serde(default, alias = "kelurahan")]
    pub village: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Value>,
    #[serde(default, rename = "type", alias = "category")]
    pub category: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Blankspot area",
        id,
    })
}

/// Validate a polygon and return it in its canonical array form.
fn normalize_polygon(raw: &Value) -> AppResult<Value> {
    let polygon = parse_polygon(raw)?;
    serde_json::to_value(polygon).map_err(|e| AppError::InternalError(e.to_string()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// POST /api/blankspots
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateBlankspotRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<BlankspotArea>>)> {
    input.validate()?;
    let coordinates = normalize_polygon(&input.coordinates)?;
    let color = non_blank(input.color).unwrap_or_else(|| DEFAULT_COLOR.to_string());
    validate_color(&color)?;

    let area = BlankspotRepo::create(
        &state.pool,
        &CreateBlankspot {
            name: input.name.trim().to_string(),
            village: input.village.trim().to_string(),
            coordinates,
            category: non_blank(input.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            color,
        },
    )
    .await?;

    tracing::info!(blankspot_id = area.id, user_id = auth.user_id, "Blankspot area created");
    Ok(ApiResponse::created(
        "Blankspot area created successfully",
        area,
    ))
}

/// GET /api/blankspots
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<BlankspotArea>>>> {
    let areas = BlankspotRepo::list(&state.pool).await?;
    Ok(ApiResponse::ok("Blankspot areas fetched successfully", areas))
}

/// GET /api/blankspots/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<BlankspotArea>>> {
    let area = BlankspotRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ApiResponse::ok("Blankspot area fetched successfully", area))
}

/// PUT /api/blankspots/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateBlankspotRequest>,
) -> AppResult<Json<ApiResponse<BlankspotArea>>> {
    input.validate()?;
    let coordinates = input.coordinates.as_ref().map(normalize_polygon).transpose()?;
    let color = non_blank(input.color);
    if let Some(ref color) = color {
        validate_color(color)?;
    }

    let update = UpdateBlankspot {
        name: input.name.map(|n| n.trim().to_string()),
        village: input.village.map(|v| v.trim().to_string()),
        coordinates,
        category: non_blank(input.category),
        color,
    };
    let area = BlankspotRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ApiResponse::ok("Blankspot area updated successfully", area))
}

/// DELETE /api/blankspots/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<Option<()>>>> {
    if !BlankspotRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(blankspot_id = id, user_id = auth.user_id, "Blankspot area permanently deleted");
    Ok(ApiResponse::message("Blankspot area permanently deleted"))
}
