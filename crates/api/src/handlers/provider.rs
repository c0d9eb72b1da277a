//! Handlers for the `/providers` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use towertrack_core::error::CoreError;
use towertrack_core::types::DbId;
use towertrack_db::models::provider::{CreateProvider, Provider, UpdateProvider};
use towertrack_db::repositories::ProviderRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for creating or renaming a provider.
#[derive(Debug, Deserialize, Validate)]
pub struct ProviderRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Provider",
        id,
    })
}

/// POST /api/providers
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<ProviderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Provider>>)> {
    input.validate()?;
    let provider = ProviderRepo::create(
        &state.pool,
        &CreateProvider {
            name: input.name.trim().to_string(),
            address: input
                .address
                .map(|a| a.trim().to_string())
                .unwrap_or_default(),
        },
    )
    .await?;

    tracing::info!(provider_id = provider.id, user_id = auth.user_id, "Provider created");
    Ok(ApiResponse::created("Provider created successfully", provider))
}

/// GET /api/providers
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Provider>>>> {
    let providers = ProviderRepo::list(&state.pool).await?;
    Ok(ApiResponse::ok("Providers fetched successfully", providers))
}

/// GET /api/providers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<Provider>>> {
    let provider = ProviderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ApiResponse::ok("Provider fetched successfully", provider))
}

/// PUT /api/providers/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ProviderRequest>,
) -> AppResult<Json<ApiResponse<Provider>>> {
    input.validate()?;
    let provider = ProviderRepo::update(
        &state.pool,
        id,
        &UpdateProvider {
            name: Some(input.name.trim().to_string()),
            address: input.address.map(|a| a.trim().to_string()),
        },
    )
    .await?
    .ok_or_else(|| not_found(id))?;
    Ok(ApiResponse::ok("Provider updated successfully", provider))
}

/// DELETE /api/providers/{id}
///
/// Permanent, soft-deleted rows included. Tower links cascade away.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<Option<()>>>> {
    ProviderRepo::find_by_id_include_deleted(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if !ProviderRepo::hard_delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(provider_id = id, user_id = auth.user_id, "Provider permanently deleted");
    Ok(ApiResponse::message("Provider permanently deleted"))
}
